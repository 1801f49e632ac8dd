use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers};

/// Current input state for the window.
///
/// Holds "is down" information; per-frame transitions are recorded into an
/// `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered to an unfocused window.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, modifiers, .. } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(
            &mut frame,
            InputEvent::Key {
                key: Key::Shift,
                state: KeyState::Pressed,
                modifiers: Modifiers { shift: true, ..Modifiers::default() },
                code: 0,
                repeat: false,
            },
        );
        assert!(state.key_down(Key::Shift));
        assert!(state.modifiers.any());

        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.key_down(Key::Shift));
        assert!(!state.focused);
    }

    #[test]
    fn release_without_press_is_not_a_transition() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(
            &mut frame,
            InputEvent::Key {
                key: Key::D,
                state: KeyState::Released,
                modifiers: Modifiers::default(),
                code: 0,
                repeat: false,
            },
        );
        assert!(frame.keys_released.is_empty());
        assert_eq!(frame.events.len(), 1);
    }
}
