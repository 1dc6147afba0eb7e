#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Interact,
    Craft,
    Pause,
    Restart,
    SelectEasy,
    SelectMedium,
    SelectHard,
}

const ACTION_COUNT: usize = 11;

/// Held state plus a press edge per action. Edges latch until the collector
/// hands them out in a snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
    pressed: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        let index = action.index();
        if is_down && !self.down[index] {
            self.pressed[index] = true;
        }
        self.down[index] = is_down;
    }

    pub(crate) fn set_pressed(&mut self, action: InputAction, pressed: bool) {
        self.pressed[action.index()] = pressed;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub(crate) fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed[action.index()]
    }

    pub(crate) fn clear_pressed(&mut self) {
        self.pressed = [false; ACTION_COUNT];
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Interact => 4,
            InputAction::Craft => 5,
            InputAction::Pause => 6,
            InputAction::Restart => 7,
            InputAction::SelectEasy => 8,
            InputAction::SelectMedium => 9,
            InputAction::SelectHard => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_edge_only_on_transition_to_down() {
        let mut states = ActionStates::default();
        states.set(InputAction::Interact, true);
        assert!(states.was_pressed(InputAction::Interact));

        states.clear_pressed();
        states.set(InputAction::Interact, true);
        assert!(!states.was_pressed(InputAction::Interact));
        assert!(states.is_down(InputAction::Interact));

        states.set(InputAction::Interact, false);
        states.set(InputAction::Interact, true);
        assert!(states.was_pressed(InputAction::Interact));
    }

    #[test]
    fn clearing_edges_keeps_held_state() {
        let mut states = ActionStates::default();
        states.set(InputAction::MoveLeft, true);
        states.clear_pressed();
        assert!(states.is_down(InputAction::MoveLeft));
        assert!(!states.was_pressed(InputAction::MoveLeft));
    }
}
