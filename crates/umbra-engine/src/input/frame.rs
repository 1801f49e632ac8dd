use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held keys, modifiers).
/// `InputFrame` provides events and transition sets for the current frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys that went down this frame (first press only, no repeats).
    pub keys_pressed: HashSet<Key>,

    /// Keys released this frame.
    pub keys_released: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    /// Every key press of this frame in arrival order, auto-repeats included.
    ///
    /// Use this for "nudge per keystroke" controls; `keys_pressed` collapses
    /// repeats and duplicates.
    pub fn key_strokes(&self) -> impl Iterator<Item = Key> + '_ {
        self.events.iter().filter_map(|ev| match ev {
            InputEvent::Key { key, state: KeyState::Pressed, .. } => Some(*key),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputState, Modifiers};

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), code: 0, repeat }
    }

    #[test]
    fn key_strokes_include_repeats_in_order() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::W, KeyState::Pressed, false));
        state.apply_event(&mut frame, key(Key::W, KeyState::Pressed, true));
        state.apply_event(&mut frame, key(Key::A, KeyState::Pressed, false));
        state.apply_event(&mut frame, key(Key::W, KeyState::Released, false));

        let strokes: Vec<Key> = frame.key_strokes().collect();
        assert_eq!(strokes, vec![Key::W, Key::W, Key::A]);
        assert_eq!(frame.keys_pressed.len(), 2);
        assert!(frame.keys_released.contains(&Key::W));
    }

    #[test]
    fn clear_drops_all_deltas() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed, false));

        frame.clear();

        assert_eq!(frame.key_strokes().count(), 0);
        assert!(frame.keys_pressed.is_empty());
        // Held state survives the frame boundary.
        assert!(state.key_down(Key::Space));
    }
}
