//! Ansishot command line

use ansishot_render::{FontPaths, RenderConfig, Renderer};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Ansishot - render captured prompt output as a terminal window PNG"
)]
pub struct Args {
    /// File with captured terminal output, or "-" for stdin
    pub input: Option<PathBuf>,

    /// PNG file to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Name credited below the attribution line
    #[arg(long)]
    pub author: Option<String>,

    /// Resolution multiplier for every pixel constant
    #[arg(long, default_value = "2.0")]
    pub scale: f32,

    /// Attribution line shown under the prompt
    #[arg(long)]
    pub attribution: Option<String>,

    /// Regular font face; system fonts are searched when omitted
    #[arg(long)]
    pub font_regular: Option<PathBuf>,

    #[arg(long, requires = "font_regular")]
    pub font_bold: Option<PathBuf>,

    #[arg(long, requires = "font_regular")]
    pub font_italic: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        let config = RenderConfig::default().with_scale(self.scale);
        match &self.attribution {
            Some(attribution) => config.with_attribution(attribution.clone()),
            None => config,
        }
    }

    pub fn font_paths(&self) -> Option<FontPaths> {
        let regular = self.font_regular.as_ref()?;
        Some(FontPaths {
            regular: regular.clone(),
            bold: self.font_bold.clone(),
            italic: self.font_italic.clone(),
        })
    }
}

/// Read captured output from a file, or stdin for `None` and `-`
pub fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read input from stdin")?;
            Ok(text)
        }
    }
}

/// Render with parsed arguments
pub fn execute(args: &Args) -> Result<()> {
    let config = args.render_config();
    let renderer = match args.font_paths() {
        Some(paths) => {
            debug!("Loading fonts from {}", paths.regular.display());
            Renderer::from_paths(config, &paths).context("Failed to load fonts")?
        }
        None => Renderer::with_system_fonts(config).context("Failed to load system fonts")?,
    };

    let input = read_input(args.input.as_deref())?;
    info!("Read {} bytes of input", input.len());

    renderer
        .save_png(&input, args.author.as_deref(), &args.output)
        .with_context(|| format!("Failed to render {}", args.output.display()))?;

    Ok(())
}

pub fn run() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(args.log_level.clone()))
        .with_writer(io::stderr)
        .init();

    execute(&args)
}
