//! Session - one running game wired to its view and journal
//!
//! The binary owns the clock and the terminal; everything between a key press
//! and a drawable [`BlockView`] lives here so it can run headless in tests.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;

use crate::core::{Engine, EngineConfig, EngineEvent};
use crate::journal::{Journal, JournalRecord};
use crate::term::{BlockView, Hud};
use crate::types::GameAction;

pub struct Session<W: Write> {
    engine: Engine,
    view: BlockView,
    journal: Option<Journal<W>>,
    frame: u64,
}

impl<W: Write> Session<W> {
    pub fn new(config: EngineConfig, journal: Option<Journal<W>>) -> Result<Self> {
        Ok(Self {
            engine: Engine::with_config(config)?,
            view: BlockView::default(),
            journal,
            frame: 0,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn view(&self) -> &BlockView {
        &self.view
    }

    pub fn journal(&self) -> Option<&Journal<W>> {
        self.journal.as_ref()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            landed: self.engine.landed(),
            game_over: self.engine.is_game_over(),
        }
    }

    /// Frames that produced at least one delta
    pub fn frames(&self) -> u64 {
        self.frame
    }

    pub fn start(&mut self, now: Duration) -> Result<()> {
        let config = *self.engine.config();
        self.log(JournalRecord::start(millis(now), &config))?;
        self.engine.start(now);
        self.sync(now)
    }

    /// Apply one player action. Returns whether it changed the piece.
    pub fn handle(&mut self, action: GameAction, now: Duration) -> Result<bool> {
        if !self.engine.is_running() {
            return Ok(false);
        }
        let applied = self.engine.apply_action(action, now);
        self.log(JournalRecord::action(millis(now), action, applied))?;
        Ok(applied)
    }

    /// Drive gravity, then hand every pending delta to the view.
    pub fn advance(&mut self, now: Duration) -> Result<()> {
        self.engine.update(now);
        self.sync(now)
    }

    /// Flush buffered journal output.
    pub fn finish(&mut self) -> Result<()> {
        if let Some(j) = self.journal.as_mut() {
            j.flush()?;
        }
        Ok(())
    }

    pub fn into_journal(self) -> Option<Journal<W>> {
        self.journal
    }

    fn sync(&mut self, now: Duration) -> Result<()> {
        let ts = millis(now);

        let deltas = self.engine.pop_delta();
        if !deltas.is_empty() {
            self.frame += 1;
            self.view.apply(&deltas);
            self.log(JournalRecord::delta(ts, self.frame, &deltas))?;
        }

        for event in self.engine.drain_events() {
            self.log(JournalRecord::event(ts, event))?;
            if let EngineEvent::GameOver { .. } = event {
                self.finish()?;
            }
        }
        Ok(())
    }

    fn log(&mut self, rec: JournalRecord) -> Result<()> {
        match self.journal.as_mut() {
            Some(j) => j.record(&rec),
            None => Ok(()),
        }
    }
}

fn millis(d: Duration) -> u64 {
    d.as_millis() as u64
}
