// Copyright (c) 2026 rezky_nightky

use std::time::Instant;

use crate::config::RainConfig;
use crate::entropy::RandomSource;
use crate::population::Population;
use crate::render::{CellSink, Renderer};

/// One rain session: the stream population plus the renderer that draws it.
pub struct Rain {
    population: Population,
    renderer: Renderer,
}

impl Rain {
    pub fn new(cfg: &RainConfig) -> Self {
        Self {
            population: Population::new(cfg),
            renderer: Renderer::new(cfg),
        }
    }

    #[allow(dead_code)]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Spawn, update, prune, then draw into `sink`.
    pub fn tick<S, R>(&mut self, now: Instant, sink: &mut S, rng: &mut R)
    where
        S: CellSink,
        R: RandomSource,
    {
        let (width, _) = sink.size();
        self.population.tick(now, width, rng);
        self.renderer
            .render(self.population.streams(), sink, rng);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::style::Color;

    use super::*;
    use crate::entropy::GlyphSource;
    use crate::frame::Frame;

    #[test]
    fn rain_fills_the_frame_over_time() {
        let cfg = RainConfig::default();
        let mut rain = Rain::new(&cfg);
        let mut rng = GlyphSource::seeded(3, &cfg);
        let mut frame = Frame::new(40, 20, Color::Black);
        frame.clear_dirty();
        let t0 = Instant::now();

        for i in 0..200u64 {
            rain.tick(t0 + cfg.tick * i as u32, &mut frame, &mut rng);
        }

        assert!(!rain.population().is_empty());
        assert!(rain.population().len() <= cfg.max_streams);
        assert!(frame.has_changes());
    }

    #[test]
    fn first_tick_spawns_but_draws_nothing() {
        let cfg = RainConfig::default();
        let mut rain = Rain::new(&cfg);
        let mut rng = GlyphSource::seeded(5, &cfg);
        let mut frame = Frame::new(40, 20, Color::Black);
        frame.clear_dirty();

        rain.tick(Instant::now(), &mut frame, &mut rng);
        assert_eq!(rain.population().len(), 1);
        assert!(!frame.has_changes());
    }

    #[test]
    fn streams_reach_the_screen_once_their_head_crosses_row_zero() {
        let cfg = RainConfig {
            max_streams: 1,
            end_probability: 0.0,
            ..RainConfig::default()
        };
        let mut rain = Rain::new(&cfg);
        let mut rng = GlyphSource::seeded(11, &cfg);
        let mut frame = Frame::new(10, 100, Color::Black);
        frame.clear_dirty();
        let t0 = Instant::now();

        rain.tick(t0, &mut frame, &mut rng);
        let length = rain.population().streams()[0].length() as u64;
        // Every tick is longer than the slowest speed, so one row per tick.
        for i in 1..=length {
            rain.tick(t0 + Duration::from_millis(i * 101), &mut frame, &mut rng);
        }

        let s = &rain.population().streams()[0];
        assert_eq!(s.head_row(), 0);
        assert_eq!(frame.dirty_indices().len(), 1);
    }
}
