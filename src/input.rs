//! Keyboard input
//!
//! Turns this frame's key presses into abstract [`Command`]s.
//! Keys pressed while Ctrl, Alt or Super is held are left to the OS.

use macroquad::prelude::*;
use crate::controller::Command;

const DIGITS: [KeyCode; 9] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
];

/// Key bindings, shown in the help line
pub const HELP: &str = "Up/Down tiles  Left/Right tint  1-9 pick tiles  Shift+1-9 pick tint  R reset  S save  F fullscreen";

fn modifier_held() -> bool {
    is_key_down(KeyCode::LeftControl)
        || is_key_down(KeyCode::RightControl)
        || is_key_down(KeyCode::LeftAlt)
        || is_key_down(KeyCode::RightAlt)
        || is_key_down(KeyCode::LeftSuper)
        || is_key_down(KeyCode::RightSuper)
}

/// Collect the commands triggered this frame
pub fn poll_commands() -> Vec<Command> {
    let mut commands = Vec::new();
    if modifier_held() {
        return commands;
    }

    if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::Equal) || is_key_pressed(KeyCode::KpAdd) {
        commands.push(Command::IncreaseDensity);
    }
    if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::Minus) || is_key_pressed(KeyCode::KpSubtract) {
        commands.push(Command::DecreaseDensity);
    }
    if is_key_pressed(KeyCode::Right) {
        commands.push(Command::NextColor);
    }
    if is_key_pressed(KeyCode::Left) {
        commands.push(Command::PreviousColor);
    }

    let shift = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
    for (index, key) in DIGITS.iter().enumerate() {
        if is_key_pressed(*key) {
            commands.push(if shift { Command::SetColor(index) } else { Command::SetDensity(index) });
        }
    }

    if is_key_pressed(KeyCode::R) || is_key_pressed(KeyCode::Key0) {
        commands.push(Command::Reset);
    }
    if is_key_pressed(KeyCode::S) {
        commands.push(Command::SaveFrame);
    }
    if is_key_pressed(KeyCode::F) {
        commands.push(Command::ToggleFullscreen);
    }

    commands
}
