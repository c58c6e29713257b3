pub mod items;
mod placement;
mod registry;
mod session;
mod target;

pub use items::{
    normalize_link_suggestion, normalize_quick_switcher_item, LinkSuggestion, QuickSwitcherItem,
};
pub use placement::{compute_preview_anchor, PlacementInput};
pub use registry::PreviewRegistry;
pub use session::{PreviewSession, ReadyOutcome, SpawnRequest};
pub use target::{strip_heading_for_link, LinkRequest, PreviewTarget};
