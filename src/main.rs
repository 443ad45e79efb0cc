//! Terminal Blockfall runner (default binary).
//!
//! It uses crossterm for input and the framebuffer renderer from `blockfall-term`.
//! Game time is measured from a single `Instant` taken at start-up and passed
//! into every engine call.

use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::core::EngineConfig;
use blockfall::input::{handle_key_event, should_quit};
use blockfall::journal::{Journal, JournalConfig};
use blockfall::session::Session;
use blockfall::term::{FrameBuffer, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;

type FileSession = Session<BufWriter<File>>;

fn main() -> Result<()> {
    let config = EngineConfig::from_env(clock_seed())?;
    let journal_config = JournalConfig::from_env();
    let journal = match journal_config.log_path.as_deref() {
        Some(path) => Some(Journal::create(path)?),
        None => None,
    };
    let mut session = Session::new(config, journal)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    let finished = session.finish();

    println!(
        "[Blockfall] seed {} | landed {} | {}",
        config.seed,
        session.engine().landed(),
        if session.engine().is_game_over() {
            "game over"
        } else {
            "quit"
        }
    );
    if let (Some(path), Some(j)) = (&journal_config.log_path, session.journal()) {
        println!("[Blockfall] {} journal records -> {}", j.records(), path.display());
    }

    result.and(finished)
}

fn run(term: &mut TerminalRenderer, session: &mut FileSession) -> Result<()> {
    let clock = Instant::now();
    let frame = Duration::from_millis(FRAME_MS);
    let mut fb = FrameBuffer::new(0, 0);

    session.start(clock.elapsed())?;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session
            .view()
            .render_into(&session.hud(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input, waiting at most one frame.
        if event::poll(frame)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.handle(action, clock.elapsed())?;
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity.
        session.advance(clock.elapsed())?;
    }
}

/// Seed for when `BLOCKFALL_SEED` is unset
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
