/// Where a coordinator is in the hold-to-preview cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewState {
    /// Modifier not held, nothing shown.
    #[default]
    Idle,
    /// Modifier held; the preview (if any) matches the selection.
    Armed,
    /// Modifier held; a new preview is loading while the old one stays on screen.
    Replacing,
}
