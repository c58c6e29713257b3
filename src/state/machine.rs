use std::collections::VecDeque;

use super::error::{StateError, StateResult};
use super::{PreviewEvent, PreviewState, StateTransition};

const TRANSITION_HISTORY_LIMIT: usize = 64;

#[derive(Debug)]
pub struct StateMachine {
    state: PreviewState,
    transition_history: VecDeque<StateTransition>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: PreviewState::default(),
            transition_history: VecDeque::new(),
        }
    }

    pub fn state(&self) -> PreviewState {
        self.state
    }

    pub fn can_transition(&self, event: PreviewEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: PreviewEvent) -> Option<PreviewState> {
        use PreviewEvent::*;
        use PreviewState::*;
        match (self.state, event) {
            (Idle, ModifierPressed) => Some(Armed),
            (Armed | Replacing, ReplacementRequested) => Some(Replacing),
            (Replacing, ReplacementReady) => Some(Armed),
            (Armed | Replacing, PreviewCleared) => Some(Armed),
            (Armed | Replacing, ModifierReleased) => Some(Idle),
            (_, ListClosed) => Some(Idle),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: PreviewEvent) -> StateResult<PreviewState> {
        tracing::debug!(from = ?self.state, event = ?event, "request preview state transition");
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::warn!(from = ?from, event = ?event, "invalid preview state transition requested");
            StateError::InvalidStateTransition { from, event }
        })?;

        let record = StateTransition::new(Some(self.state), event, next);
        self.state = next;
        if self.transition_history.len() == TRANSITION_HISTORY_LIMIT {
            self.transition_history.pop_front();
        }
        self.transition_history.push_back(record);

        Ok(self.state)
    }

    pub fn history(&self) -> impl Iterator<Item = &StateTransition> {
        self.transition_history.iter()
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PreviewState::{:?}", self.state)
    }
}
