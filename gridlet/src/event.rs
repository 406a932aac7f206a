/// Result of dispatching an interaction to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was not handled; nothing changed
    Ignored,
    /// Event was handled
    Consumed,
}

impl EventResult {
    /// Check if the event was handled
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

/// Modifier keys state for interaction entry points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control key held
    pub ctrl: bool,
    /// Shift key held
    pub shift: bool,
    /// Alt key held
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Shift only
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Control only
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Alt only
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Check if any modifier is active
    pub fn any(&self) -> bool {
        self.ctrl || self.shift || self.alt
    }
}
