// Copyright (c) 2026 rezky_nightky

use std::time::Instant;

use crate::config::RainConfig;
use crate::entropy::RandomSource;
use crate::stream::Stream;

/// Owns the active streams and evolves them once per tick.
pub struct Population {
    streams: Vec<Stream>,
    max_streams: usize,
    end_probability: f64,
}

impl Population {
    pub fn new(cfg: &RainConfig) -> Self {
        Self {
            streams: Vec::with_capacity(cfg.max_streams),
            max_streams: cfg.max_streams,
            end_probability: cfg.end_probability,
        }
    }

    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Adds one stream if below the cap. Never more than one per call, so the
    /// screen fills up gradually.
    pub fn spawn<R: RandomSource>(&mut self, now: Instant, width: u16, rng: &mut R) -> bool {
        if self.streams.len() >= self.max_streams || width == 0 {
            return false;
        }

        let column = rng.column(width);
        let length = rng.length();
        let speed = rng.speed();
        let color = rng.color();
        self.streams
            .push(Stream::new(column, length, speed, color, now));
        true
    }

    /// Advances every due stream by one row and rolls for its retirement.
    pub fn update<R: RandomSource>(&mut self, now: Instant, rng: &mut R) {
        for s in &mut self.streams {
            if s.is_retired() || !s.is_due(now) {
                continue;
            }

            s.advance();
            s.mark_advanced(now);

            if rng.chance() < self.end_probability {
                s.retire();
            }
        }
    }

    /// Drops retired streams, keeping the survivors in insertion order.
    pub fn prune(&mut self) -> usize {
        let before = self.streams.len();
        self.streams.retain(|s| !s.is_retired());
        before - self.streams.len()
    }

    pub fn tick<R: RandomSource>(&mut self, now: Instant, width: u16, rng: &mut R) {
        self.spawn(now, width, rng);
        self.update(now, rng);
        self.prune();
    }
}
