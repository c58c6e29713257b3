pub mod app;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod geometry;
pub mod host;
pub mod input;
pub mod logging;
pub mod preview;
pub mod state;
#[cfg(test)]
mod testing;

pub use app::QuickPreview;
pub use config::{load_preview_config, PositionMode, PreviewConfig};
pub use coordinator::{ItemNormalizer, PreviewCoordinator};
pub use error::{PreviewError, PreviewResult};
pub use host::{
    AttachError, Chooser, InputScope, OwnerId, PreviewRenderer, PreviewRequest, PreviewSurface,
    PreviewTicket, SuggestionList,
};
pub use preview::{PreviewRegistry, PreviewTarget};

/// Loads the user's config, installs logging for it and returns a ready integration layer.
pub fn start() -> QuickPreview {
    let config = load_preview_config();
    logging::init_for_config(&config);
    tracing::info!(modifier = ?config.modifier, position = ?config.position, "starting quick preview");
    QuickPreview::new(config)
}
