// Support configuring Bevy lints within code.
#![cfg_attr(bevy_lint, feature(register_tool), register_tool(bevy))]
// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

#[cfg(feature = "dev_native")]
mod debug_tools;

mod camera;
mod config;
mod controls;
mod convert;
mod hud;
mod input;
mod labels;
mod overlay;
mod rotor;
mod server;
mod snapshot;
mod world;

pub use config::ViewerConfig;
pub use rotor::{BodyFrame, RotorFrame, RotorObject, RotorPool};
pub use snapshot::AppliedSnapshot;

use bevy::prelude::*;

fn main() -> AppExit {
    App::new().add_plugins(AppPlugin).run()
}

/// Per-frame ordering inside `Update`.
///
/// Operator input lands first, then at most one snapshot is drained from the buffer and pushed
/// through the scene, overlays and labels in that order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerSet {
    Input,
    Drain,
    Sync,
    Overlay,
    Labels,
}

pub struct AppPlugin;
impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ViewerConfig::from_cli_env());

        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Window {
                title: "Tilt-Rotor Debug Viewer".to_string(),
                fit_canvas_to_parent: true,
                ..default()
            }
            .into(),
            ..default()
        }));

        app.configure_sets(
            Update,
            (
                ViewerSet::Input,
                ViewerSet::Drain,
                ViewerSet::Sync,
                ViewerSet::Overlay,
                ViewerSet::Labels,
            )
                .chain(),
        );

        app.add_plugins((
            server::plugin,
            snapshot::plugin,
            world::plugin,
            camera::plugin,
            input::plugin,
            controls::plugin,
            rotor::plugin,
            overlay::plugin,
            labels::plugin,
            hud::plugin,
        ));

        #[cfg(feature = "dev_native")]
        app.add_plugins(debug_tools::plugin);
    }
}
