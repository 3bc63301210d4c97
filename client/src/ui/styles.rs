//! Shared UI styles

use bevy::prelude::*;

/// Translucent panel behind the instructions
pub const PANEL_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);

pub const TEXT_COLOR: Color = Color::WHITE;
pub const TEXT_MUTED: Color = Color::srgb(0.75, 0.75, 0.75);

/// Centered instructions panel
pub fn panel_style() -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Percent(50.0),
        top: Val::Percent(50.0),
        // Half the panel size, pulls it back onto the centre point
        margin: UiRect {
            left: Val::Px(-220.0),
            top: Val::Px(-60.0),
            ..default()
        },
        width: Val::Px(440.0),
        flex_direction: FlexDirection::Column,
        align_items: AlignItems::Center,
        padding: UiRect::all(Val::Px(20.0)),
        ..default()
    }
}

/// Body text style
pub fn body_text_style() -> TextFont {
    TextFont {
        font_size: 18.0,
        ..default()
    }
}
