use serde::{Deserialize, Serialize};

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
}

impl Platform {
    pub const fn current() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Linux
        }
    }
}

/// Modifier the user holds to request a preview.
///
/// `Mod` is the platform's primary shortcut modifier: command on macOS, ctrl elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModifierKey {
    Mod,
    Ctrl,
    Meta,
    Shift,
    #[default]
    Alt,
}

impl ModifierKey {
    pub const ALL: [ModifierKey; 5] = [
        ModifierKey::Mod,
        ModifierKey::Ctrl,
        ModifierKey::Meta,
        ModifierKey::Shift,
        ModifierKey::Alt,
    ];

    /// Collapses `Mod` into the concrete modifier it stands for on `platform`.
    pub const fn resolve(self, platform: Platform) -> ModifierKey {
        match (self, platform) {
            (ModifierKey::Mod, Platform::MacOs) => ModifierKey::Meta,
            (ModifierKey::Mod, _) => ModifierKey::Ctrl,
            (other, _) => other,
        }
    }

    pub fn matches_key(self, key: Key, platform: Platform) -> bool {
        matches!(
            (self.resolve(platform), key),
            (ModifierKey::Ctrl, Key::Control)
                | (ModifierKey::Meta, Key::Meta)
                | (ModifierKey::Shift, Key::Shift)
                | (ModifierKey::Alt, Key::Alt)
        )
    }

    pub const fn display_name(self, platform: Platform) -> &'static str {
        let mac = matches!(platform, Platform::MacOs);
        match self {
            ModifierKey::Mod if mac => "command",
            ModifierKey::Mod => "Ctrl",
            ModifierKey::Shift if mac => "shift",
            ModifierKey::Shift => "Shift",
            ModifierKey::Alt if mac => "option",
            ModifierKey::Alt => "Alt",
            ModifierKey::Meta if mac => "command",
            ModifierKey::Meta if matches!(platform, Platform::Windows) => "Win",
            ModifierKey::Meta => "Meta",
            ModifierKey::Ctrl => "ctrl",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Control,
    Shift,
    Alt,
    Meta,
    Character(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierState {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl ModifierState {
    pub const NONE: ModifierState = ModifierState {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub fn only(modifier: ModifierKey, platform: Platform) -> Self {
        let mut state = Self::NONE;
        match modifier.resolve(platform) {
            ModifierKey::Ctrl | ModifierKey::Mod => state.ctrl = true,
            ModifierKey::Meta => state.meta = true,
            ModifierKey::Shift => state.shift = true,
            ModifierKey::Alt => state.alt = true,
        }
        state
    }

    pub fn includes(&self, modifier: ModifierKey, platform: Platform) -> bool {
        match modifier.resolve(platform) {
            ModifierKey::Ctrl | ModifierKey::Mod => self.ctrl,
            ModifierKey::Meta => self.meta,
            ModifierKey::Shift => self.shift,
            ModifierKey::Alt => self.alt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: ModifierState,
}

impl KeyEvent {
    pub const fn new(key: Key, modifiers: ModifierState) -> Self {
        Self { key, modifiers }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub modifiers: ModifierState,
}

impl PointerEvent {
    pub const fn new(position: Point, modifiers: ModifierState) -> Self {
        Self {
            position,
            modifiers,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierTransition {
    Pressed,
    Released,
}

/// Event-driven "is the preview modifier held" flag.
///
/// Only real transitions are reported; repeated key-downs from auto-repeat or a key-up
/// while already released yield `None`.
#[derive(Debug, Clone)]
pub struct ModifierTracker {
    modifier: ModifierKey,
    platform: Platform,
    held: bool,
}

impl ModifierTracker {
    pub const fn for_platform(modifier: ModifierKey, platform: Platform) -> Self {
        Self {
            modifier,
            platform,
            held: false,
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn on_key_down(&mut self, event: &KeyEvent, list_open: bool) -> Option<ModifierTransition> {
        if !list_open {
            return None;
        }
        let matches = event.modifiers.includes(self.modifier, self.platform)
            || self.modifier.matches_key(event.key, self.platform);
        if !matches || self.held {
            return None;
        }
        self.held = true;
        Some(ModifierTransition::Pressed)
    }

    pub fn on_key_up(&mut self, event: &KeyEvent) -> Option<ModifierTransition> {
        if !self.modifier.matches_key(event.key, self.platform) {
            return None;
        }
        self.release()
    }

    // Some platforms swallow key-up for meta, so a pointer move without the flag counts as release.
    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> Option<ModifierTransition> {
        if event.modifiers.includes(self.modifier, self.platform) {
            return None;
        }
        self.release()
    }

    pub fn reset(&mut self) {
        self.held = false;
    }

    fn release(&mut self) -> Option<ModifierTransition> {
        if !self.held {
            return None;
        }
        self.held = false;
        Some(ModifierTransition::Released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alt() -> ModifierState {
        ModifierState::only(ModifierKey::Alt, Platform::Linux)
    }

    #[test]
    fn key_down_with_modifier_flag_presses_only_when_list_open() {
        let mut tracker = ModifierTracker::for_platform(ModifierKey::Alt, Platform::Linux);
        let event = KeyEvent::new(Key::Alt, alt());

        assert_eq!(tracker.on_key_down(&event, false), None);
        assert!(!tracker.is_held());

        assert_eq!(
            tracker.on_key_down(&event, true),
            Some(ModifierTransition::Pressed)
        );
        assert!(tracker.is_held());
    }

    #[test]
    fn repeated_key_down_reports_a_single_transition() {
        let mut tracker = ModifierTracker::for_platform(ModifierKey::Alt, Platform::Linux);
        let event = KeyEvent::new(Key::Alt, alt());

        assert!(tracker.on_key_down(&event, true).is_some());
        assert_eq!(tracker.on_key_down(&event, true), None);
        assert_eq!(
            tracker.on_key_down(&KeyEvent::new(Key::ArrowDown, alt()), true),
            None
        );
    }

    #[test]
    fn key_up_of_other_keys_is_ignored() {
        let mut tracker = ModifierTracker::for_platform(ModifierKey::Alt, Platform::Linux);
        tracker.on_key_down(&KeyEvent::new(Key::Alt, alt()), true);

        assert_eq!(tracker.on_key_up(&KeyEvent::new(Key::Shift, alt())), None);
        assert!(tracker.is_held());
        assert_eq!(
            tracker.on_key_up(&KeyEvent::new(Key::Alt, ModifierState::NONE)),
            Some(ModifierTransition::Released)
        );
        assert_eq!(
            tracker.on_key_up(&KeyEvent::new(Key::Alt, ModifierState::NONE)),
            None
        );
    }

    #[test]
    fn held_flag_tracks_latest_transition_over_a_sequence() {
        let mut tracker = ModifierTracker::for_platform(ModifierKey::Shift, Platform::Linux);
        let shift = ModifierState::only(ModifierKey::Shift, Platform::Linux);
        let down = KeyEvent::new(Key::Shift, shift);
        let up = KeyEvent::new(Key::Shift, ModifierState::NONE);

        let sequence = [true, true, false, true, false, false, true];
        for press in sequence {
            if press {
                tracker.on_key_down(&down, true);
            } else {
                tracker.on_key_up(&up);
            }
            assert_eq!(tracker.is_held(), press);
        }
    }

    #[test]
    fn pointer_move_without_modifier_forces_release() {
        let mut tracker = ModifierTracker::for_platform(ModifierKey::Meta, Platform::MacOs);
        let meta = ModifierState::only(ModifierKey::Meta, Platform::MacOs);
        tracker.on_key_down(&KeyEvent::new(Key::Meta, meta), true);

        let still_held = PointerEvent::new(Point::new(4.0, 4.0), meta);
        assert_eq!(tracker.on_pointer_move(&still_held), None);
        assert!(tracker.is_held());

        let released = PointerEvent::new(Point::new(5.0, 5.0), ModifierState::NONE);
        assert_eq!(
            tracker.on_pointer_move(&released),
            Some(ModifierTransition::Released)
        );
        assert!(!tracker.is_held());
        assert_eq!(tracker.on_pointer_move(&released), None);
    }

    #[test]
    fn mod_resolves_per_platform() {
        assert_eq!(ModifierKey::Mod.resolve(Platform::MacOs), ModifierKey::Meta);
        assert_eq!(ModifierKey::Mod.resolve(Platform::Windows), ModifierKey::Ctrl);
        assert!(ModifierKey::Mod.matches_key(Key::Meta, Platform::MacOs));
        assert!(!ModifierKey::Mod.matches_key(Key::Control, Platform::MacOs));
        assert!(ModifierKey::Mod.matches_key(Key::Control, Platform::Linux));

        let ctrl = ModifierState {
            ctrl: true,
            ..ModifierState::NONE
        };
        assert!(ctrl.includes(ModifierKey::Mod, Platform::Linux));
        assert!(!ctrl.includes(ModifierKey::Mod, Platform::MacOs));
    }

    #[test]
    fn only_state_includes_just_its_own_modifier() {
        for platform in [Platform::MacOs, Platform::Windows, Platform::Linux] {
            for modifier in ModifierKey::ALL {
                let state = ModifierState::only(modifier, platform);
                assert!(state.includes(modifier, platform));
                let others = ModifierKey::ALL
                    .into_iter()
                    .filter(|other| other.resolve(platform) != modifier.resolve(platform));
                for other in others {
                    assert!(!state.includes(other, platform), "{modifier:?} vs {other:?}");
                }
            }
        }
    }

    #[test]
    fn display_names_follow_platform_conventions() {
        assert_eq!(ModifierKey::Mod.display_name(Platform::MacOs), "command");
        assert_eq!(ModifierKey::Mod.display_name(Platform::Linux), "Ctrl");
        assert_eq!(ModifierKey::Alt.display_name(Platform::MacOs), "option");
        assert_eq!(ModifierKey::Meta.display_name(Platform::Windows), "Win");
        assert_eq!(ModifierKey::Meta.display_name(Platform::Linux), "Meta");
        assert_eq!(ModifierKey::Ctrl.display_name(Platform::MacOs), "ctrl");
    }
}
