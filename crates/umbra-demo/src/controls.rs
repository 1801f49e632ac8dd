use umbra_engine::input::Key;
use umbra_engine::scene::LightCommand;

/// What a single keystroke asks the demo to do.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Action {
    Light(LightCommand),
    Quit,
}

/// Key bindings of the demo. Unbound keys map to `None`.
pub fn action_for(key: Key) -> Option<Action> {
    let command = match key {
        Key::W => LightCommand::Forward,
        Key::S => LightCommand::Back,
        Key::A => LightCommand::Left,
        Key::D => LightCommand::Right,
        Key::Space => LightCommand::Raise,
        Key::Shift => LightCommand::Lower,
        Key::R => LightCommand::Reset,
        Key::Escape => return Some(Action::Quit),
        _ => return None,
    };
    Some(Action::Light(command))
}

#[cfg(test)]
mod tests {
    use super::*;
    use umbra_engine::scene::Light;

    #[test]
    fn movement_keys_map_to_light_commands() {
        assert_eq!(action_for(Key::W), Some(Action::Light(LightCommand::Forward)));
        assert_eq!(action_for(Key::S), Some(Action::Light(LightCommand::Back)));
        assert_eq!(action_for(Key::A), Some(Action::Light(LightCommand::Left)));
        assert_eq!(action_for(Key::D), Some(Action::Light(LightCommand::Right)));
        assert_eq!(action_for(Key::Space), Some(Action::Light(LightCommand::Raise)));
        assert_eq!(action_for(Key::Shift), Some(Action::Light(LightCommand::Lower)));
        assert_eq!(action_for(Key::R), Some(Action::Light(LightCommand::Reset)));
    }

    #[test]
    fn escape_quits_and_other_keys_are_unbound() {
        assert_eq!(action_for(Key::Escape), Some(Action::Quit));
        assert_eq!(action_for(Key::Q), None);
        assert_eq!(action_for(Key::Unknown(0)), None);
    }

    #[test]
    fn w_then_d_moves_light_diagonally() {
        let mut light = Light::new();
        for key in [Key::W, Key::D] {
            if let Some(Action::Light(cmd)) = action_for(key) {
                light.apply(cmd);
            }
        }
        let p = light.position();
        assert!((p.x - 0.3).abs() < 1e-6);
        assert!((p.z + 0.3).abs() < 1e-6);
        assert!((p.y - 10.0).abs() < 1e-6);
    }
}
