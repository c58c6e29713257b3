use super::model::PreviewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewEvent {
    ModifierPressed,
    ReplacementRequested,
    ReplacementReady,
    PreviewCleared,
    ModifierReleased,
    ListClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: Option<PreviewState>,
    pub event: PreviewEvent,
    pub to: PreviewState,
}

impl StateTransition {
    pub const fn new(from: Option<PreviewState>, event: PreviewEvent, to: PreviewState) -> Self {
        Self { from, event, to }
    }
}
