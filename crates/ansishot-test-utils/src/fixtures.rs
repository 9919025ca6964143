use ansishot_render::font::discover_paths;
use ansishot_render::FontPaths;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Font files of an installed monospace family.
///
/// Panics when none is installed, so tests that rasterize real glyphs fail
/// instead of passing without drawing anything.
pub fn system_font_paths() -> FontPaths {
    match discover_paths() {
        Some(paths) => paths,
        None => panic!(
            "no system monospace font found; install DejaVu Sans Mono or Liberation Mono to run raster tests"
        ),
    }
}

/// Scratch directory for files a test writes or reads
pub struct TestFixtures {
    temp_dir: TempDir,
}

impl TestFixtures {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn create_test_file(&self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let file_path = self.temp_dir.path().join(name);
        std::fs::write(&file_path, content)?;
        Ok(file_path)
    }

    /// Path inside the fixture directory that does not exist yet
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

// Captured prompt output
pub mod data {
    pub const PLAIN: &str = "$ echo hello\nhello";

    pub const RED_HELLO: &str = "\x1b[31mHello\x1b[0m";

    pub const RGB_PAIR: &str = "\x1b[48;2;10;20;30m\x1b[38;2;200;200;200mX";

    pub const HYPERLINK: &str = "\x1b[1m\x1b]8;;file:///home/jan\x1b\\click\x1b]8;;\x1b\\\x1b[22m";

    /// Two-line prompt with a right prompt and a powerline segment
    pub const POWERLINE: &str = concat!(
        "\x1b]0;~/code\x07",
        "\x1b[38;2;0;135;175;49m\x1b[7m\u{e0b6}\x1b[m",
        "\x1b[48;2;0;135;175m\x1b[38;2;255;255;255m ~/code \x1b[0m",
        "\x1b[38;2;0;135;175m\u{e0b0}\x1b[0m",
        "\x1b7\x1b[1000C\x1b[32m12:04\x1b[0m\x1b8",
        "\n\x1b[1m\x1b[32m❯\x1b[22m\x1b[0m \x1b[K",
    );

    pub const STYLES: &str = "\x1b[1mbold\x1b[22m \x1b[3mitalic\x1b[23m \x1b[4munder\x1b[24m";

    pub fn generate_lines(count: usize) -> String {
        (0..count)
            .map(|i| format!("\x1b[3{}mline {i}\x1b[0m", i % 8))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
