// Copyright (c) 2026 rezky_nightky

use std::io::Result;
use std::time::Duration;

use crossterm::style::Color;

use crate::entropy::RandomSource;
use crate::palette::{BACKGROUND, TEXT};

/// Colors and cursor visibility of a console. `None` means the terminal's own
/// default color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayState {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub cursor_visible: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            fg: None,
            bg: None,
            cursor_visible: true,
        }
    }
}

/// Line-oriented output surface the closing message is typed onto.
pub trait Console {
    fn clear(&mut self) -> Result<()>;
    fn new_line(&mut self) -> Result<()>;
    fn write_char(&mut self, ch: char) -> Result<()>;
    fn apply(&mut self, state: DisplayState) -> Result<()>;
    fn state(&self) -> DisplayState;
    fn pause(&mut self, d: Duration);
}

/// Clears the screen and types `message` one character at a time with a
/// random delay before each, then hands the console back in `restore` state
/// and holds for `final_pause`.
pub fn type_out<C, R>(
    console: &mut C,
    message: &str,
    restore: DisplayState,
    final_pause: Duration,
    rng: &mut R,
) -> Result<()>
where
    C: Console,
    R: RandomSource,
{
    console.clear()?;
    console.write_char(' ')?;
    console.new_line()?;

    console.apply(DisplayState {
        fg: Some(TEXT),
        bg: Some(BACKGROUND),
        cursor_visible: true,
    })?;

    for ch in message.chars() {
        console.pause(rng.typing_delay());
        console.write_char(ch)?;
    }

    if console.state() != restore {
        console.apply(restore)?;
    }
    console.pause(final_pause);
    console.new_line()
}
