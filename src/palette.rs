// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

/// Base colors a stream can be assigned at spawn.
pub const STREAM_COLORS: [Color; 2] = [Color::Green, Color::DarkGreen];

pub const HEAD: Color = Color::White;
pub const BACKGROUND: Color = Color::Black;

/// Foreground used for the whole screen during the animation and for the
/// closing message.
pub const TEXT: Color = Color::DarkGreen;
