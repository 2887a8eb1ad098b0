//! On-screen toggle buttons and their keyboard shortcuts.
//!
//! Both paths funnel into [`DisplayState::activate`]; the resource is only touched when a
//! control actually fires so `resource_changed::<OverlayDisplay>` marks real toggles.

use crate::{ViewerSet, input::InputAction};
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use shared::{DisplayControl, DisplayState};

const BUTTON_IDLE: Color = Color::srgba(0.12, 0.12, 0.14, 0.85);
const BUTTON_HOVERED: Color = Color::srgba(0.22, 0.22, 0.26, 0.9);
const BUTTON_PRESSED: Color = Color::srgba(0.32, 0.42, 0.62, 0.95);

/// Which overlay groups are currently drawn.
#[derive(Resource, Debug, Default)]
pub struct OverlayDisplay(pub DisplayState);

#[derive(Component, Debug)]
pub struct ControlButton(pub DisplayControl);

#[derive(Component, Debug)]
struct ControlCaption(DisplayControl);

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<OverlayDisplay>();
    app.add_systems(Startup, spawn_controls);
    app.add_systems(
        Update,
        (handle_shortcuts, handle_buttons).in_set(ViewerSet::Input),
    );
    app.add_systems(
        Update,
        (
            style_buttons,
            refresh_captions.run_if(resource_changed::<OverlayDisplay>),
        ),
    );
}

fn spawn_controls(mut commands: Commands, display: Res<OverlayDisplay>) {
    let panel = commands
        .spawn((
            Name::new("Controls"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                right: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
        ))
        .id();

    for control in DisplayControl::ALL {
        commands.spawn((
            Name::new(format!("{control:?} button")),
            Button,
            ControlButton(control),
            Node {
                padding: UiRect::axes(Val::Px(10.0), Val::Px(5.0)),
                min_width: Val::Px(190.0),
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            ChildOf(panel),
            children![(
                ControlCaption(control),
                Text::new(display.0.caption(control)),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            )],
        ));
    }
}

fn handle_shortcuts(
    actions: Res<ActionState<InputAction>>,
    mut display: ResMut<OverlayDisplay>,
) {
    for action in InputAction::ALL {
        if actions.just_pressed(&action) {
            debug!("Shortcut {action:?}");
            display.0.activate(action.control());
        }
    }
}

fn handle_buttons(
    buttons: Query<(&Interaction, &ControlButton), Changed<Interaction>>,
    mut display: ResMut<OverlayDisplay>,
) {
    for (interaction, button) in &buttons {
        if *interaction == Interaction::Pressed {
            display.0.activate(button.0);
        }
    }
}

fn style_buttons(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<ControlButton>)>,
) {
    for (interaction, mut background) in &mut buttons {
        background.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVERED,
            Interaction::None => BUTTON_IDLE,
        };
    }
}

fn refresh_captions(display: Res<OverlayDisplay>, mut captions: Query<(&mut Text, &ControlCaption)>) {
    for (mut text, caption) in &mut captions {
        text.0 = display.0.caption(caption.0).to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ThrustMode, TorqueMode};

    fn app() -> App {
        let mut app = App::new();
        app.init_resource::<OverlayDisplay>();
        app.insert_resource(ActionState::<InputAction>::default());
        app.add_systems(Startup, spawn_controls);
        app.add_systems(
            Update,
            (handle_shortcuts, handle_buttons, refresh_captions).chain(),
        );
        app.update();
        app
    }

    fn display(app: &App) -> DisplayState {
        app.world().resource::<OverlayDisplay>().0
    }

    fn caption(app: &mut App, control: DisplayControl) -> String {
        let mut q = app.world_mut().query::<(&Text, &ControlCaption)>();
        q.iter(app.world())
            .find(|(_, c)| c.0 == control)
            .map(|(text, _)| text.0.clone())
            .unwrap()
    }

    #[test]
    fn captions_start_from_the_defaults() {
        let mut app = app();
        assert_eq!(caption(&mut app, DisplayControl::Labels), "Labels: on");
        assert_eq!(caption(&mut app, DisplayControl::Torque), "Torque: off");
    }

    #[test]
    fn pressing_a_button_advances_its_control() {
        let mut app = app();
        let mut q = app.world_mut().query::<(Entity, &ControlButton)>();
        let torque = q
            .iter(app.world())
            .find(|(_, b)| b.0 == DisplayControl::Torque)
            .map(|(e, _)| e)
            .unwrap();

        app.world_mut().entity_mut(torque).insert(Interaction::Pressed);
        app.update();

        assert_eq!(display(&app).torque_mode(), TorqueMode::PerRotor);
        assert_eq!(caption(&mut app, DisplayControl::Torque), "Torque: per rotor");

        // Holding the button does not repeat.
        app.update();
        assert_eq!(display(&app).torque_mode(), TorqueMode::PerRotor);
    }

    #[test]
    fn shortcut_advances_its_control() {
        let mut app = app();
        app.world_mut()
            .resource_mut::<ActionState<InputAction>>()
            .press(&InputAction::CycleThrustMode);
        app.update();

        assert_eq!(display(&app).thrust_mode(), ThrustMode::Body);
        assert_eq!(caption(&mut app, DisplayControl::ThrustMode), "Thrust: body frame");
        assert!(display(&app).labels());
    }
}
