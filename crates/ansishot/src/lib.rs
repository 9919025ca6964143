//! Ansishot command line tool

pub mod cli;
