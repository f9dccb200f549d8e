// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::closing::{Console, DisplayState};
use crate::frame::Frame;
use crate::palette::{BACKGROUND, TEXT};

/// Why [`Terminal::wait_until`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wake {
    Deadline,
    Key,
    Resize(u16, u16),
}

/// Owns the real terminal for the lifetime of the rain. Raw mode, colors and
/// cursor visibility are put back on drop, whatever path leads there.
pub struct Terminal {
    stdout: Stdout,
    initial: DisplayState,
    state: DisplayState,
    run_buf: String,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.queue(cursor::Hide)?;
            let _ = out.queue(terminal::DisableLineWrap);
            out.queue(SetForegroundColor(TEXT))?;
            out.queue(SetBackgroundColor(BACKGROUND))?;
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            initial: DisplayState::default(),
            state: DisplayState {
                fg: Some(TEXT),
                bg: Some(BACKGROUND),
                cursor_visible: false,
            },
            run_buf: String::with_capacity(64),
        })
    }

    /// Display state to hand back when the rain is over.
    pub fn initial_state(&self) -> DisplayState {
        self.initial
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    /// Blocks until `deadline`, a key press or a resize, whichever comes first.
    /// Key releases and other events are swallowed.
    pub fn wait_until(deadline: Instant) -> Result<Wake> {
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                return Ok(Wake::Deadline);
            }
            match event::read()? {
                Event::Key(k) if k.kind == KeyEventKind::Press => return Ok(Wake::Key),
                Event::Resize(w, h) => return Ok(Wake::Resize(w, h)),
                _ => {}
            }
        }
    }

    fn set_fg(&mut self, fg: Color) -> Result<()> {
        if self.state.fg != Some(fg) {
            self.stdout.queue(SetForegroundColor(fg))?;
            self.state.fg = Some(fg);
        }
        Ok(())
    }

    fn set_bg(&mut self, bg: Color) -> Result<()> {
        if self.state.bg != Some(bg) {
            self.stdout.queue(SetBackgroundColor(bg))?;
            self.state.bg = Some(bg);
        }
        Ok(())
    }

    fn paint_all(&mut self, frame: &Frame) -> Result<()> {
        let blank = frame.blank();
        self.set_bg(blank.bg)?;
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;

        for y in 0..frame.height {
            for x in 0..frame.width {
                let Some(idx) = frame.index(x, y) else {
                    continue;
                };
                let cell = frame.cell_at_index(idx);
                if cell == blank {
                    continue;
                }
                self.stdout.queue(cursor::MoveTo(x, y))?;
                self.set_fg(cell.fg)?;
                self.set_bg(cell.bg)?;
                self.stdout.queue(Print(cell.ch))?;
            }
        }
        Ok(())
    }

    fn paint_dirty(&mut self, frame: &Frame) -> Result<()> {
        let width = frame.width as usize;
        if width == 0 {
            return Ok(());
        }

        let mut dirty = frame.dirty_indices().to_vec();
        dirty.sort_unstable();

        let mut cur_pos: Option<usize> = None;
        let mut i = 0usize;
        while i < dirty.len() {
            let idx0 = dirty[i];
            let cell0 = frame.cell_at_index(idx0);

            self.run_buf.clear();
            self.run_buf.push(cell0.ch);
            let mut last = idx0;
            let mut j = i + 1;

            // Coalesce horizontally adjacent cells with identical colors.
            while j < dirty.len() {
                let idx1 = dirty[j];
                if idx1 != last + 1 || idx1 % width == 0 {
                    break;
                }
                let cell1 = frame.cell_at_index(idx1);
                if cell1.fg != cell0.fg || cell1.bg != cell0.bg {
                    break;
                }
                self.run_buf.push(cell1.ch);
                last = idx1;
                j += 1;
            }

            if cur_pos != Some(idx0) {
                let x = (idx0 % width) as u16;
                let y = (idx0 / width) as u16;
                self.stdout.queue(cursor::MoveTo(x, y))?;
            }
            self.set_fg(cell0.fg)?;
            self.set_bg(cell0.bg)?;
            self.stdout.queue(Print(self.run_buf.as_str()))?;

            cur_pos = if (last + 1) % width == 0 {
                None
            } else {
                Some(last + 1)
            };
            i = j;
        }
        Ok(())
    }

    /// Pushes whatever changed in `frame` to the screen and marks it clean.
    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        if !frame.has_changes() {
            return Ok(());
        }

        if frame.is_dirty_all() {
            self.paint_all(frame)?;
        } else {
            self.paint_dirty(frame)?;
        }

        self.stdout.flush()?;
        frame.clear_dirty();
        Ok(())
    }
}

impl Console for Terminal {
    fn clear(&mut self) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.queue(cursor::MoveTo(0, 0))?;
        self.stdout.flush()
    }

    fn new_line(&mut self) -> Result<()> {
        // Raw mode: a bare \n would not return the carriage.
        self.stdout.queue(Print("\r\n"))?;
        self.stdout.flush()
    }

    fn write_char(&mut self, ch: char) -> Result<()> {
        self.stdout.queue(Print(ch))?;
        self.stdout.flush()
    }

    fn apply(&mut self, state: DisplayState) -> Result<()> {
        self.stdout
            .queue(SetForegroundColor(state.fg.unwrap_or(Color::Reset)))?;
        self.stdout
            .queue(SetBackgroundColor(state.bg.unwrap_or(Color::Reset)))?;
        if state.cursor_visible {
            self.stdout.queue(cursor::Show)?;
        } else {
            self.stdout.queue(cursor::Hide)?;
        }
        self.stdout.flush()?;
        self.state = state;
        Ok(())
    }

    fn state(&self) -> DisplayState {
        self.state
    }

    fn pause(&mut self, d: Duration) {
        thread::sleep(d);
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let initial = self.initial;
        if self.apply(initial).is_err() {
            let _ = self.stdout.execute(ResetColor);
            let _ = self.stdout.execute(cursor::Show);
        }
        let _ = self.stdout.execute(terminal::EnableLineWrap);
        let _ = terminal::disable_raw_mode();
        let _ = self.stdout.flush();
    }
}

/// Used from the panic hook and signal handlers, where the `Terminal` value
/// is out of reach.
pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
