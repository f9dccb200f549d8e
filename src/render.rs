// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

use crate::cell::Cell;
use crate::config::RainConfig;
use crate::entropy::RandomSource;
use crate::palette::{BACKGROUND, HEAD};
use crate::stream::Stream;

/// Anything the renderer can place cells on.
pub trait CellSink {
    /// `(width, height)` in cells.
    fn size(&self) -> (u16, u16);
    fn put(&mut self, col: u16, row: u16, cell: Cell);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharLoc {
    Head,
    Middle,
    Tail,
}

impl CharLoc {
    fn of(offset: u16, length: u16) -> Self {
        if offset + 1 == length {
            CharLoc::Tail
        } else if offset == 0 {
            CharLoc::Head
        } else {
            CharLoc::Middle
        }
    }
}

/// Maps streams to cell writes. Holds no screen state of its own: whatever a
/// stream leaves behind is cleared by its own tail erase on a later tick.
pub struct Renderer {
    white_tip_probability: f64,
}

impl Renderer {
    pub fn new(cfg: &RainConfig) -> Self {
        Self {
            white_tip_probability: cfg.white_tip_probability,
        }
    }

    pub fn render<S, R>(&self, streams: &[Stream], sink: &mut S, rng: &mut R)
    where
        S: CellSink,
        R: RandomSource,
    {
        let (_, height) = sink.size();
        let height = i32::from(height);

        for s in streams {
            if s.is_retired() {
                continue;
            }

            for i in 0..s.length() {
                let row = s.head_row() - i32::from(i);
                if row < 0 || row >= height {
                    continue;
                }

                let ch = rng.glyph();
                let cell = match CharLoc::of(i, s.length()) {
                    CharLoc::Tail => Cell::erased(ch, BACKGROUND),
                    CharLoc::Head => Cell {
                        ch,
                        fg: self.head_color(s, rng),
                        bg: BACKGROUND,
                    },
                    CharLoc::Middle => Cell {
                        ch,
                        fg: s.color(),
                        bg: BACKGROUND,
                    },
                };

                sink.put(s.column(), row as u16, cell);
            }
        }
    }

    fn head_color<R: RandomSource>(&self, s: &Stream, rng: &mut R) -> Color {
        if rng.chance() < self.white_tip_probability {
            HEAD
        } else {
            s.color()
        }
    }
}
