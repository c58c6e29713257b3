use tracing_subscriber::EnvFilter;

use crate::config::PreviewConfig;

/// Installs the global fmt subscriber. `RUST_LOG` wins over the built-in default.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init() {
    init_with_level("info");
}

/// Like [`init`], but turns on crate debug output when the config asks for it.
pub fn init_for_config(config: &PreviewConfig) {
    init_with_level(if config.debug_log { "debug" } else { "info" });
}

fn init_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quick_preview={level}")));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
