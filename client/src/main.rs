//! Rotunda client - renders the round office and walks the player through it

mod input;
mod states;
mod systems;
mod ui;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use shared::{load_settings_from_file, InputState, Settings};
use std::path::{Path, PathBuf};

use states::GameState;

/// Get the asset path - for bundled macOS apps, use path relative to executable
fn get_asset_path() -> PathBuf {
    // Try to find assets relative to executable (for .app bundles)
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let bundled_assets = exe_dir.join("assets");
            if bundled_assets.exists() {
                info!("Using bundled assets at: {:?}", bundled_assets);
                return bundled_assets;
            }
        }
    }
    // Fall back to default "assets" folder (for development)
    PathBuf::from("assets")
}

/// Read `settings.ron` from the asset folder, falling back to defaults
fn load_settings(asset_path: &Path) -> Settings {
    let path = asset_path.join("settings.ron");
    if !path.exists() {
        info!("No {:?}; using default settings", path);
        return Settings::default();
    }

    match load_settings_from_file(&path) {
        Ok(settings) => {
            info!("Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!("Ignoring settings file: {e}; using defaults");
            Settings::default()
        }
    }
}

fn main() {
    let asset_path = get_asset_path();

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Rotunda".to_string(),
                    resolution: WindowResolution::new(1280, 720),
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                file_path: asset_path.to_string_lossy().to_string(),
                ..default()
            }),
    );

    // Read after DefaultPlugins so LogPlugin is already installed
    let settings = load_settings(&asset_path);
    app.insert_resource(settings.player_controller());
    app.insert_resource(settings);
    app.init_resource::<InputState>();

    app.init_state::<GameState>();
    app.add_plugins(ui::InstructionsPlugin);

    // World build first so the registry exists before the player can move
    app.add_systems(Startup, (systems::spawn_office, systems::spawn_player).chain());

    app.add_systems(OnEnter(GameState::Paused), input::release_cursor);
    app.add_systems(Update, input::grab_cursor.run_if(in_state(GameState::Paused)));
    app.add_systems(Update, input::handle_escape_key.run_if(in_state(GameState::Walking)));

    // ORDER MATTERS: flags and look first, then the tick, then the rig.
    app.add_systems(
        Update,
        (
            input::handle_keyboard_input,
            input::handle_mouse_input,
            systems::step_player.run_if(in_state(GameState::Walking)),
            systems::sync_player_transforms,
        )
            .chain(),
    );

    app.add_systems(Update, systems::animate_statue);

    info!("Starting Rotunda walkthrough");
    app.run();
}
