//! Hotkey system - keyboard shortcuts management

use eframe::egui;
use std::collections::HashMap;

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    LineDown,
    LineUp,
    PageDown,
    PageUp,
    Top,
    Bottom,
    EnterImmersive,
    ExitImmersive,
    ToggleFullscreen,
    ToggleHelp,
    ToggleSettings,
}

/// Hotkey handler for managing keyboard shortcuts
pub struct HotkeyHandler {
    bindings: HashMap<String, HotkeyAction>,
}

impl Default for HotkeyHandler {
    fn default() -> Self {
        let mut handler = Self::new();
        handler.setup_default_bindings();
        handler
    }
}

impl HotkeyHandler {
    /// Create hotkey handler without bindings
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Handle key press
    pub fn handle_key(&self, key: &str) -> Option<HotkeyAction> {
        self.bindings.get(key).copied()
    }

    /// Handle key with modifiers
    pub fn handle_key_with_modifiers(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> Option<HotkeyAction> {
        let mut key_combo = String::new();
        if ctrl {
            key_combo.push_str("Ctrl+");
        }
        if shift {
            key_combo.push_str("Shift+");
        }
        if alt {
            key_combo.push_str("Alt+");
        }
        key_combo.push_str(key);

        self.handle_key(&key_combo)
    }

    /// Add hotkey binding
    pub fn add_binding(&mut self, key: &str, action: HotkeyAction) {
        self.bindings.insert(key.to_string(), action);
    }

    /// Setup default hotkey bindings
    pub fn setup_default_bindings(&mut self) {
        use HotkeyAction::*;

        self.add_binding("ArrowDown", LineDown);
        self.add_binding("ArrowUp", LineUp);
        self.add_binding("PageDown", PageDown);
        self.add_binding("Space", PageDown);
        self.add_binding("PageUp", PageUp);
        self.add_binding("Shift+Space", PageUp);
        self.add_binding("Home", Top);
        self.add_binding("End", Bottom);
        self.add_binding("Enter", EnterImmersive);
        self.add_binding("Escape", ExitImmersive);
        self.add_binding("F11", ToggleFullscreen);
        self.add_binding("Z", ToggleFullscreen);
        self.add_binding("F1", ToggleHelp);
        self.add_binding("F12", ToggleSettings);
    }

    /// All bound key presses of this frame, in input order
    pub fn handle_input(&self, input: &egui::InputState) -> Vec<HotkeyAction> {
        let mut actions = Vec::new();
        // key pressed events only, not keys_down, so holding a key repeats at OS rate
        for event in &input.events {
            if let egui::Event::Key { key, pressed: true, modifiers, .. } = event {
                let key_str = format!("{:?}", key);

                if let Some(action) =
                    self.handle_key_with_modifiers(&key_str, modifiers.ctrl, modifiers.shift, modifiers.alt)
                {
                    actions.push(action);
                } else if !modifiers.any()
                    && let Some(action) = self.handle_key(&key_str)
                {
                    actions.push(action);
                }
            }
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let handler = HotkeyHandler::default();
        assert_eq!(handler.handle_key("PageDown"), Some(HotkeyAction::PageDown));
        assert_eq!(handler.handle_key("Escape"), Some(HotkeyAction::ExitImmersive));
        assert_eq!(
            handler.handle_key_with_modifiers("Space", false, true, false),
            Some(HotkeyAction::PageUp)
        );
        assert_eq!(handler.handle_key("Q"), None);
    }

    #[test]
    fn test_key_names_match_egui() {
        let handler = HotkeyHandler::default();
        for key in [egui::Key::ArrowDown, egui::Key::F11, egui::Key::Home] {
            assert!(handler.handle_key(&format!("{:?}", key)).is_some(), "{:?}", key);
        }
    }

    #[test]
    fn test_rebinding() {
        let mut handler = HotkeyHandler::new();
        assert_eq!(handler.handle_key("J"), None);
        handler.add_binding("J", HotkeyAction::LineDown);
        assert_eq!(handler.handle_key("J"), Some(HotkeyAction::LineDown));
        // Rebinding a key replaces its action
        handler.add_binding("Z", HotkeyAction::ToggleHelp);
        assert_eq!(handler.handle_key("Z"), Some(HotkeyAction::ToggleHelp));
    }
}
