pub mod canvas;
pub mod fixtures;

pub use canvas::{FixedMetrics, Op, RecordingCanvas};
pub use fixtures::{system_font_paths, TestFixtures};

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("ansishot=debug,ansishot_render=debug,ansishot_ansi=debug")
            }))
            .with_test_writer()
            .init();
    });
}
