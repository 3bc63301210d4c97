//! "Click to play" overlay, visible whenever the pointer is not captured

use bevy::prelude::*;

use super::styles::*;
use crate::states::GameState;

pub struct InstructionsPlugin;

impl Plugin for InstructionsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_instructions);
        app.add_systems(OnEnter(GameState::Paused), show_instructions);
        app.add_systems(OnEnter(GameState::Walking), hide_instructions);
    }
}

/// Marker for the overlay root
#[derive(Component)]
struct InstructionsRoot;

fn spawn_instructions(mut commands: Commands) {
    commands
        .spawn((
            InstructionsRoot,
            panel_style(),
            BackgroundColor(PANEL_BACKGROUND),
            BorderRadius::all(Val::Px(10.0)),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new("Click to play"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                Node {
                    margin: UiRect::bottom(Val::Px(8.0)),
                    ..default()
                },
            ));
            panel.spawn((
                Text::new("W,A,S,D = Move, Mouse = Look around, Q/E = Turn"),
                body_text_style(),
                TextColor(TEXT_COLOR),
            ));
            panel.spawn((
                Text::new("ESC to pause"),
                body_text_style(),
                TextColor(TEXT_MUTED),
            ));
        });
}

fn show_instructions(mut roots: Query<&mut Visibility, With<InstructionsRoot>>) {
    for mut visibility in roots.iter_mut() {
        *visibility = Visibility::Visible;
    }
}

fn hide_instructions(mut roots: Query<&mut Visibility, With<InstructionsRoot>>) {
    for mut visibility in roots.iter_mut() {
        *visibility = Visibility::Hidden;
    }
}
