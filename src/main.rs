// Copyright (c) 2026 rezky_nightky

mod cell;
mod closing;
mod config;
mod entropy;
mod frame;
mod glyphs;
mod palette;
mod population;
mod rain;
mod render;
mod stream;
mod terminal;

use std::time::Instant;

#[cfg(unix)]
use std::thread;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::config::{print_info, print_tunables, Args, RainConfig, CLOSING_MESSAGE};
use crate::entropy::GlyphSource;
use crate::frame::Frame;
use crate::palette::BACKGROUND;
use crate::rain::Rain;
use crate::terminal::{restore_terminal_best_effort, Terminal, Wake};

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
}

fn install_exit_handlers() {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }
}

/// Runs the rain until a key press, then types the closing message. The
/// terminal is restored when `term` drops, including on the error paths.
fn run(cfg: &RainConfig) -> std::io::Result<()> {
    let mut source = GlyphSource::from_os_rng(cfg);
    let mut term = Terminal::new()?;
    let (w, h) = term.size()?;

    let mut frame = Frame::new(w, h, BACKGROUND);
    let mut rain = Rain::new(cfg);
    let mut next_tick = Instant::now();

    loop {
        rain.tick(Instant::now(), &mut frame, &mut source);
        term.draw(&mut frame)?;

        next_tick += cfg.tick;
        let now = Instant::now();
        if now > next_tick {
            next_tick = now;
        }

        match Terminal::wait_until(next_tick)? {
            Wake::Key => break,
            Wake::Resize(nw, nh) => {
                frame = Frame::new(nw, nh, BACKGROUND);
            }
            Wake::Deadline => {}
        }
    }

    let initial = term.initial_state();
    closing::type_out(
        &mut term,
        CLOSING_MESSAGE,
        initial,
        cfg.closing_pause,
        &mut source,
    )
}

fn main() -> std::io::Result<()> {
    install_exit_handlers();

    let cmd = Args::command().styles(clap_styles());
    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let cfg = RainConfig::default();

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        print_info();
        return Ok(());
    }

    if args.tunables {
        print_tunables(&cfg);
        return Ok(());
    }

    run(&cfg)
}
