//! Tests for the ansishot command line

use ansishot::cli::{execute, read_input, Args};
use ansishot_test_utils::fixtures::data;
use ansishot_test_utils::{init_test_logging, system_font_paths, TestFixtures};
use clap::Parser;
use std::path::Path;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["ansishot", "-o", "out.png"]).unwrap();
        assert!(args.input.is_none());
        assert_eq!(args.output, Path::new("out.png"));
        assert_eq!(args.scale, 2.0);
        assert!(args.font_paths().is_none());

        let config = args.render_config();
        assert_eq!(config.attribution, "https://ohmyposh.dev");
        assert_eq!(config.scale, 2.0);
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "ansishot",
            "prompt.txt",
            "--output",
            "out.png",
            "--author",
            "jan",
            "--scale",
            "1.5",
            "--attribution",
            "example.test",
            "--font-regular",
            "r.ttf",
            "--font-bold",
            "b.ttf",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.input.as_deref(), Some(Path::new("prompt.txt")));
        assert_eq!(args.author.as_deref(), Some("jan"));

        let config = args.render_config();
        assert_eq!(config.scale, 1.5);
        assert_eq!(config.attribution, "example.test");

        let fonts = args.font_paths().unwrap();
        assert_eq!(fonts.regular, Path::new("r.ttf"));
        assert_eq!(fonts.bold.as_deref(), Some(Path::new("b.ttf")));
        assert!(fonts.italic.is_none());
    }

    #[test]
    fn test_output_is_required() {
        assert!(Args::try_parse_from(["ansishot", "prompt.txt"]).is_err());
    }

    #[test]
    fn test_bold_requires_regular() {
        assert!(Args::try_parse_from(["ansishot", "-o", "x.png", "--font-bold", "b.ttf"]).is_err());
    }

    #[test]
    fn test_read_input_from_file() {
        let fixtures = TestFixtures::new().unwrap();
        let path = fixtures
            .create_test_file("prompt.txt", data::POWERLINE.as_bytes())
            .unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), data::POWERLINE);
    }

    #[test]
    fn test_missing_input_has_context() {
        let err = read_input(Some(Path::new("/nonexistent/prompt.txt"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/prompt.txt"));
    }

    #[test]
    fn test_missing_font_fails_before_rendering() {
        let fixtures = TestFixtures::new().unwrap();
        let output = fixtures.output_path("out.png");
        let args = Args::try_parse_from([
            "ansishot",
            "-o",
            output.to_str().unwrap(),
            "--font-regular",
            "/nonexistent/font.ttf",
        ])
        .unwrap();

        let err = execute(&args).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load fonts"));
        assert!(!output.exists());
    }

    #[test]
    fn test_execute_writes_png() {
        init_test_logging();
        let fonts = system_font_paths();
        let fixtures = TestFixtures::new().unwrap();
        let input = fixtures
            .create_test_file("prompt.txt", data::RED_HELLO.as_bytes())
            .unwrap();
        let output = fixtures.output_path("out.png");

        let args = Args::try_parse_from([
            "ansishot",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--scale",
            "1",
            "--font-regular",
            fonts.regular.to_str().unwrap(),
        ])
        .unwrap();

        execute(&args).unwrap();
        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
