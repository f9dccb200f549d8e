// Copyright (c) 2026 rezky_nightky

use std::time::Duration;

use crossterm::style::Color;
use rand::{
    distr::{Distribution, Uniform},
    rngs::StdRng,
    Rng, SeedableRng,
};

use crate::config::RainConfig;
use crate::glyphs::build_glyphs;
use crate::palette::STREAM_COLORS;

/// Every random decision the rain makes goes through this trait, so the
/// population, renderer and closing sequence can be driven deterministically.
pub trait RandomSource {
    fn glyph(&mut self) -> char;
    /// Uniform in `[0, width)`. `width` must be non-zero.
    fn column(&mut self, width: u16) -> u16;
    fn length(&mut self) -> u16;
    fn speed(&mut self) -> Duration;
    fn color(&mut self) -> Color;
    /// Uniform in `[0, 1)`.
    fn chance(&mut self) -> f64;
    fn typing_delay(&mut self) -> Duration;
}

pub struct GlyphSource {
    mt: StdRng,
    glyphs: Vec<char>,

    rand_glyph: Uniform<usize>,
    rand_len: Uniform<u16>,
    rand_speed_ms: Uniform<u64>,
    rand_color: Uniform<usize>,
    rand_chance: Uniform<f64>,
    rand_delay_ms: Uniform<u64>,
}

impl GlyphSource {
    pub fn from_os_rng(cfg: &RainConfig) -> Self {
        Self::with_rng(StdRng::from_os_rng(), cfg)
    }

    #[allow(dead_code)]
    pub fn seeded(seed: u64, cfg: &RainConfig) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), cfg)
    }

    fn with_rng(mt: StdRng, cfg: &RainConfig) -> Self {
        let mut glyphs = build_glyphs();
        if glyphs.is_empty() {
            glyphs.push('0');
            glyphs.push('1');
        }

        Self {
            mt,
            rand_glyph: Uniform::new(0, glyphs.len()).expect("valid range"),
            glyphs,
            rand_len: Uniform::new(cfg.length.start, cfg.length.end).expect("valid range"),
            rand_speed_ms: Uniform::new(cfg.speed_ms.start, cfg.speed_ms.end)
                .expect("valid range"),
            rand_color: Uniform::new(0, STREAM_COLORS.len()).expect("valid range"),
            rand_chance: Uniform::new(0.0, 1.0).expect("valid range"),
            rand_delay_ms: Uniform::new(cfg.typing_delay_ms.start, cfg.typing_delay_ms.end)
                .expect("valid range"),
        }
    }
}

impl RandomSource for GlyphSource {
    fn glyph(&mut self) -> char {
        self.glyphs[self.rand_glyph.sample(&mut self.mt)]
    }

    fn column(&mut self, width: u16) -> u16 {
        self.mt.random_range(0..width.max(1))
    }

    fn length(&mut self) -> u16 {
        self.rand_len.sample(&mut self.mt)
    }

    fn speed(&mut self) -> Duration {
        Duration::from_millis(self.rand_speed_ms.sample(&mut self.mt))
    }

    fn color(&mut self) -> Color {
        STREAM_COLORS[self.rand_color.sample(&mut self.mt)]
    }

    fn chance(&mut self) -> f64 {
        self.rand_chance.sample(&mut self.mt)
    }

    fn typing_delay(&mut self) -> Duration {
        Duration::from_millis(self.rand_delay_ms.sample(&mut self.mt))
    }
}

#[cfg(test)]
pub mod script {
    use std::collections::VecDeque;
    use std::time::Duration;

    use crossterm::style::Color;

    use super::RandomSource;

    /// Hands out fixed spawn parameters and a queue of chance values.
    pub struct Scripted {
        pub column: u16,
        pub length: u16,
        pub speed: Duration,
        pub color: Color,
        pub chances: VecDeque<f64>,
        /// Returned once `chances` runs dry.
        pub fallback_chance: f64,
        pub typing_delay: Duration,
        pub glyphs: Vec<char>,
        pub glyph_draws: usize,
    }

    impl Scripted {
        pub fn new(column: u16, length: u16, speed_ms: u64) -> Self {
            Self {
                column,
                length,
                speed: Duration::from_millis(speed_ms),
                color: Color::DarkGreen,
                chances: VecDeque::new(),
                fallback_chance: 0.5,
                typing_delay: Duration::from_millis(100),
                glyphs: vec!['a', 'b', 'c'],
                glyph_draws: 0,
            }
        }

        /// No stream ever retires and the head is never white.
        pub fn calm(column: u16, length: u16, speed_ms: u64) -> Self {
            let mut s = Self::new(column, length, speed_ms);
            s.fallback_chance = 0.99;
            s
        }
    }

    impl RandomSource for Scripted {
        fn glyph(&mut self) -> char {
            let ch = self.glyphs[self.glyph_draws % self.glyphs.len()];
            self.glyph_draws += 1;
            ch
        }

        fn column(&mut self, width: u16) -> u16 {
            self.column.min(width.saturating_sub(1))
        }

        fn length(&mut self) -> u16 {
            self.length
        }

        fn speed(&mut self) -> Duration {
            self.speed
        }

        fn color(&mut self) -> Color {
            self.color
        }

        fn chance(&mut self) -> f64 {
            self.chances.pop_front().unwrap_or(self.fallback_chance)
        }

        fn typing_delay(&mut self) -> Duration {
            self.typing_delay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_source_stays_inside_configured_ranges() {
        let cfg = RainConfig::default();
        let mut src = GlyphSource::seeded(7, &cfg);
        let glyphs = build_glyphs();

        for _ in 0..2000 {
            let len = src.length();
            assert!(cfg.length.contains(&len));

            let ms = src.speed().as_millis() as u64;
            assert!(cfg.speed_ms.contains(&ms));

            assert!(STREAM_COLORS.contains(&src.color()));
            assert!(src.column(80) < 80);

            let c = src.chance();
            assert!((0.0..1.0).contains(&c));

            let d = src.typing_delay().as_millis() as u64;
            assert!(cfg.typing_delay_ms.contains(&d));

            assert!(glyphs.contains(&src.glyph()));
        }
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let cfg = RainConfig::default();
        let mut a = GlyphSource::seeded(42, &cfg);
        let mut b = GlyphSource::seeded(42, &cfg);
        let sa: String = (0..32).map(|_| a.glyph()).collect();
        let sb: String = (0..32).map(|_| b.glyph()).collect();
        assert_eq!(sa, sb);
    }

    #[test]
    fn single_column_terminal_always_yields_zero() {
        let mut src = GlyphSource::seeded(1, &RainConfig::default());
        for _ in 0..50 {
            assert_eq!(src.column(1), 0);
        }
    }
}
