// Copyright (c) 2026 rezky_nightky

use std::io::IsTerminal;
use std::ops::Range;
use std::time::Duration;

use clap::Parser;

pub const MAX_STREAMS: usize = 500;

pub const MIN_STREAM_LENGTH: u16 = 16;
pub const MAX_STREAM_LENGTH: u16 = 64;

pub const MIN_STREAM_SPEED_MS: u64 = 10;
pub const MAX_STREAM_SPEED_MS: u64 = 100;

pub const STREAM_END_PROBABILITY: f64 = 0.01;
pub const WHITE_TIP_PROBABILITY: f64 = 0.8;

pub const TICK: Duration = Duration::from_millis(50);

pub const MIN_TYPING_DELAY_MS: u64 = 50;
pub const MAX_TYPING_DELAY_MS: u64 = 500;
pub const CLOSING_PAUSE: Duration = Duration::from_millis(250);

pub const CLOSING_MESSAGE: &str = "Follow the white rabbit...";

/// Tunables for one rain session. `Default` is the only set the binary uses;
/// tests derive smaller variants from it.
#[derive(Clone, Debug, PartialEq)]
pub struct RainConfig {
    pub max_streams: usize,
    /// Half-open range of stream lengths, in cells.
    pub length: Range<u16>,
    /// Half-open range of per-stream advance intervals, in ms.
    pub speed_ms: Range<u64>,
    pub end_probability: f64,
    pub white_tip_probability: f64,
    pub tick: Duration,
    /// Half-open range of per-character typewriter delays, in ms.
    pub typing_delay_ms: Range<u64>,
    pub closing_pause: Duration,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            max_streams: MAX_STREAMS,
            length: MIN_STREAM_LENGTH..MAX_STREAM_LENGTH,
            speed_ms: MIN_STREAM_SPEED_MS..MAX_STREAM_SPEED_MS,
            end_probability: STREAM_END_PROBABILITY,
            white_tip_probability: WHITE_TIP_PROBABILITY,
            tick: TICK,
            typing_delay_ms: MIN_TYPING_DELAY_MS..MAX_TYPING_DELAY_MS,
            closing_pause: CLOSING_PAUSE,
        }
    }
}

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

fn heading(text: &str) -> String {
    if color_enabled_stdout() {
        format!("\x1b[1;36m{}\x1b[0m", text)
    } else {
        text.to_string()
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "digirain",
    about = "Digital rain in the terminal. Press any key to wake up.",
    disable_version_flag = true
)]
pub struct Args {
    #[arg(
        long = "tunables",
        help_heading = "HELP",
        help = "Print the fixed animation constants and exit"
    )]
    pub tunables: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'V',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

pub fn print_info() {
    println!("Version: v{}", env!("CARGO_PKG_VERSION"));
    println!("Copyright: (c) 2026 {}", env!("CARGO_PKG_AUTHORS"));
    println!("License: {}", env!("CARGO_PKG_LICENSE"));
    println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
}

pub fn print_tunables(cfg: &RainConfig) {
    println!("{}", heading("TUNABLES:"));
    println!("  max streams        {}", cfg.max_streams);
    println!(
        "  stream length      [{}, {}) cells",
        cfg.length.start, cfg.length.end
    );
    println!(
        "  stream speed       [{}, {}) ms per row",
        cfg.speed_ms.start, cfg.speed_ms.end
    );
    println!("  end probability    {}", cfg.end_probability);
    println!("  white tip          {}", cfg.white_tip_probability);
    println!("  tick               {} ms", cfg.tick.as_millis());
    println!();
    println!("{}", heading("CLOSING:"));
    println!("  message            {:?}", CLOSING_MESSAGE);
    println!(
        "  typing delay       [{}, {}) ms per char",
        cfg.typing_delay_ms.start, cfg.typing_delay_ms.end
    );
    println!("  final pause        {} ms", cfg.closing_pause.as_millis());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_canonical_constants() {
        let cfg = RainConfig::default();
        assert_eq!(cfg.max_streams, 500);
        assert_eq!(cfg.length, 16..64);
        assert_eq!(cfg.speed_ms, 10..100);
        assert_eq!(cfg.tick, Duration::from_millis(50));
        assert_eq!(cfg.typing_delay_ms, 50..500);
        assert_eq!(cfg.closing_pause, Duration::from_millis(250));
    }

    #[test]
    fn args_accept_no_flags() {
        let args = Args::try_parse_from(["digirain"]).unwrap();
        assert!(!args.info && !args.version && !args.tunables);
    }

    #[test]
    fn args_reject_unknown_flags() {
        assert!(Args::try_parse_from(["digirain", "--speed", "3"]).is_err());
    }
}
