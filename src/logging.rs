use std::cell::Cell;

use kenburns::KenBurnsDelegate;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

/// Logs view callbacks and remembers when a run has finished.
#[derive(Debug, Default)]
pub struct LoggingDelegate {
    finished: Cell<bool>,
}

impl LoggingDelegate {
    pub fn is_finished(&self) -> bool {
        self.finished.get()
    }

    pub fn reset(&self) {
        self.finished.set(false);
    }
}

impl KenBurnsDelegate for LoggingDelegate {
    fn did_show_image(&self, index: usize) {
        info!(index, "showing image");
    }

    fn did_finish_all_animations(&self) {
        info!("all animations finished");
        self.finished.set(true);
    }
}
