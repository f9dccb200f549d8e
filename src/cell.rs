// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    pub fn blank(bg: Color) -> Self {
        Self { ch: ' ', fg: bg, bg }
    }

    /// Glyph drawn invisibly: foreground and background are both `bg`.
    pub fn erased(ch: char, bg: Color) -> Self {
        Self { ch, fg: bg, bg }
    }

    #[allow(dead_code)]
    pub fn is_erased(&self) -> bool {
        self.fg == self.bg
    }
}
