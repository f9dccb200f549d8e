// Copyright (c) 2026 rezky_nightky

use std::time::{Duration, Instant};

use crossterm::style::Color;

/// One falling column of glyphs.
///
/// Placement, length, speed and color are fixed at creation; only the head
/// position, the advance timestamp and the retired flag change afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Stream {
    column: u16,
    head_row: i32,
    length: u16,
    speed: Duration,
    color: Color,
    last_advance: Instant,
    retired: bool,
}

impl Stream {
    /// Creates a stream whose head sits `length` rows above the top edge.
    pub fn new(column: u16, length: u16, speed: Duration, color: Color, now: Instant) -> Self {
        Self {
            column,
            head_row: -i32::from(length),
            length,
            speed,
            color,
            last_advance: now,
            retired: false,
        }
    }

    pub fn column(&self) -> u16 {
        self.column
    }

    pub fn head_row(&self) -> i32 {
        self.head_row
    }

    pub fn length(&self) -> u16 {
        self.length
    }

    #[allow(dead_code)]
    pub fn speed(&self) -> Duration {
        self.speed
    }

    pub fn color(&self) -> Color {
        self.color
    }

    #[allow(dead_code)]
    pub fn last_advance(&self) -> Instant {
        self.last_advance
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    /// True once strictly more than `speed` has passed since the last advance.
    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_advance) > self.speed
    }

    /// Moves the head down one row. Does not touch the advance timestamp; see
    /// [`Stream::mark_advanced`].
    pub fn advance(&mut self) {
        self.head_row += 1;
    }

    pub fn mark_advanced(&mut self, now: Instant) {
        self.last_advance = now;
    }

    pub fn retire(&mut self) {
        self.retired = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(length: u16, speed_ms: u64, now: Instant) -> Stream {
        Stream::new(3, length, Duration::from_millis(speed_ms), Color::Green, now)
    }

    #[test]
    fn new_stream_starts_above_the_screen() {
        let s = make(20, 30, Instant::now());
        assert_eq!(s.head_row(), -20);
        assert!(!s.is_retired());
    }

    #[test]
    fn advance_moves_one_row_and_keeps_timestamp() {
        let t0 = Instant::now();
        let mut s = make(16, 10, t0);
        s.advance();
        s.advance();
        assert_eq!(s.head_row(), -14);
        assert_eq!(s.last_advance(), t0);
    }

    #[test]
    fn is_due_requires_strictly_more_than_speed() {
        let t0 = Instant::now();
        let s = make(16, 30, t0);
        assert!(!s.is_due(t0));
        assert!(!s.is_due(t0 + Duration::from_millis(30)));
        assert!(s.is_due(t0 + Duration::from_millis(31)));
    }

    #[test]
    fn mark_advanced_restarts_the_timer() {
        let t0 = Instant::now();
        let mut s = make(16, 30, t0);
        let t1 = t0 + Duration::from_millis(40);
        s.mark_advanced(t1);
        assert!(!s.is_due(t1 + Duration::from_millis(30)));
        assert!(s.is_due(t1 + Duration::from_millis(31)));
    }

    #[test]
    fn retire_is_idempotent() {
        let mut s = make(16, 30, Instant::now());
        s.retire();
        s.retire();
        assert!(s.is_retired());
    }
}
