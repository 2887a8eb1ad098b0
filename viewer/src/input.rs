use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use shared::DisplayControl;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    ToggleLabels,
    CycleThrustMode,
    ToggleNetThrust,
    CycleTorque,
}

impl InputAction {
    pub const ALL: [InputAction; 4] = [
        InputAction::ToggleLabels,
        InputAction::CycleThrustMode,
        InputAction::ToggleNetThrust,
        InputAction::CycleTorque,
    ];

    pub fn control(self) -> DisplayControl {
        match self {
            InputAction::ToggleLabels => DisplayControl::Labels,
            InputAction::CycleThrustMode => DisplayControl::ThrustMode,
            InputAction::ToggleNetThrust => DisplayControl::NetThrust,
            InputAction::CycleTorque => DisplayControl::Torque,
        }
    }

    fn key(self) -> KeyCode {
        match self {
            InputAction::ToggleLabels => KeyCode::KeyL,
            InputAction::CycleThrustMode => KeyCode::KeyT,
            InputAction::ToggleNetThrust => KeyCode::KeyN,
            InputAction::CycleTorque => KeyCode::KeyQ,
        }
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    app.insert_resource(input_map());
    app.insert_resource(ActionState::<InputAction>::default());
}

fn input_map() -> InputMap<InputAction> {
    let mut input_map = InputMap::<InputAction>::default();
    for action in InputAction::ALL {
        input_map.insert(action, action.key());
    }
    input_map
}
