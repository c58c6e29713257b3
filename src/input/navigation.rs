use std::fmt;

use crate::host::InputScope;

use super::ModifierKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    Up,
    Down,
}

/// Modifier + arrow chord registered on a list's input scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub modifier: ModifierKey,
    pub direction: NavigationDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(pub u64);

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "binding#{}", self.0)
    }
}

/// What the host should do with a key after the coordinator saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The coordinator handled it; suppress the host's default handling.
    Consumed,
    PassThrough,
}

#[derive(Debug, Default)]
pub struct NavigationInterceptor {
    bindings: Vec<BindingId>,
}

impl NavigationInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, scope: &mut dyn InputScope, modifier: ModifierKey) {
        if self.is_installed() {
            tracing::debug!("navigation bindings already installed");
            return;
        }
        for direction in [NavigationDirection::Up, NavigationDirection::Down] {
            let id = scope.register(KeyBinding {
                modifier,
                direction,
            });
            tracing::debug!(%id, ?direction, ?modifier, "registered navigation binding");
            self.bindings.push(id);
        }
    }

    pub fn uninstall(&mut self, scope: &mut dyn InputScope) {
        for id in self.bindings.drain(..) {
            scope.unregister(id);
            tracing::debug!(%id, "unregistered navigation binding");
        }
    }

    pub fn is_installed(&self) -> bool {
        !self.bindings.is_empty()
    }

    pub fn bindings(&self) -> &[BindingId] {
        &self.bindings
    }

    /// Navigation keys are redirected only while the modifier is held.
    pub fn intercepts(&self, modifier_held: bool) -> bool {
        modifier_held && self.is_installed()
    }
}
