//! Engine module - the game's state-update core
//!
//! Owns the grid of landed blocks, the active piece, and the pending delta list.
//! Every mutating operation runs inside one delta-capture window: occupancy is
//! snapshotted before and after, and the difference is queued for the renderer.
//!
//! Time is game time since session start, passed into each call. The engine
//! never reads a clock itself, so a game is fully reproducible from its seed and
//! the sequence of `(operation, now)` calls.

use std::time::Duration;

use crate::config::{ConfigError, EngineConfig};
use crate::delta::{self, Occupancy};
use crate::grid::Grid;
use crate::piece::Piece;
use crate::spawner::Spawner;
use crate::types::{CellDelta, GameAction, PieceKind, GRID_WIDTH};

/// Lifecycle of one game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Constructed, waiting for [`Engine::start`]
    Ready,
    Running,
    /// A piece could not be placed; the board is frozen
    GameOver,
}

/// Notable engine transitions, drained by observers such as the event journal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// A piece merged into the grid; `landed` counts pieces landed so far
    Landed { kind: PieceKind, landed: u32 },
    GameOver { landed: u32 },
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    grid: Grid,
    current: Option<Piece>,
    pending: Vec<CellDelta>,
    spawner: Spawner,
    status: EngineStatus,
    /// Game time of the last move/rotate/drop
    last_action_at: Duration,
    /// Game time of the next gravity tick, while running
    next_tick_at: Option<Duration>,
    landed: u32,
    events: Vec<EngineEvent>,
}

impl Engine {
    /// Create an engine with default timings and the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::build(EngineConfig::with_seed(seed))
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            grid: Grid::new(),
            current: None,
            pending: Vec::new(),
            spawner: Spawner::new(config.seed),
            status: EngineStatus::Ready,
            last_action_at: Duration::ZERO,
            next_tick_at: None,
            landed: 0,
            events: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == EngineStatus::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.status == EngineStatus::GameOver
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    /// Pieces merged into the grid so far
    pub fn landed(&self) -> u32 {
        self.landed
    }

    pub fn last_action_at(&self) -> Duration {
        self.last_action_at
    }

    pub fn next_tick_at(&self) -> Option<Duration> {
        self.next_tick_at
    }

    /// Every occupied cell, with the active piece drawn over the grid
    pub fn occupancy(&self) -> Occupancy {
        delta::occupancy(&self.grid, self.current.as_ref())
    }

    /// Spawn the first piece and arm the periodic tick.
    ///
    /// The new piece's cells are queued as deltas. Starting twice is a no-op.
    pub fn start(&mut self, now: Duration) {
        if self.status != EngineStatus::Ready {
            return;
        }
        self.status = EngineStatus::Running;

        let piece = self.spawner.spawn();
        self.pending
            .extend(delta::tag_all(piece.cells(), Some(piece.kind())));
        self.current = Some(piece);
        self.next_tick_at = Some(now + self.config.tick_interval);

        if !self.valid() {
            self.enter_game_over();
        }
    }

    /// Drive the periodic tick: run [`Engine::tick`] once if it is due.
    ///
    /// Missed intervals are skipped, not replayed. Returns whether a tick ran.
    pub fn update(&mut self, now: Duration) -> bool {
        let Some(due) = self.next_tick_at else {
            return false;
        };
        if !self.is_running() || now < due {
            return false;
        }

        self.tick(now);

        if self.is_running() {
            let interval = self.config.tick_interval;
            let mut next = due + interval;
            if next <= now {
                next = now + interval;
            }
            self.next_tick_at = Some(next);
        }
        true
    }

    /// Whether the active piece fits: inside the walls, above the floor, and
    /// clear of every landed block.
    pub fn valid(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|p| p.is_valid(&self.grid))
    }

    /// Gravity step: move the piece down one row.
    ///
    /// When the row below is blocked the move is reverted, and the piece lands
    /// only if more than the lock grace period has passed since the last player
    /// action. Returns whether the piece landed.
    pub fn tick(&mut self, now: Duration) -> bool {
        if !self.is_running() {
            return false;
        }
        let grace = self.config.lock_grace;

        self.capture(|e| {
            e.shift(0, -1);
            if e.valid() {
                return false;
            }
            e.shift(0, 1);

            if now.saturating_sub(e.last_action_at) > grace {
                e.land();
                return true;
            }
            false
        })
    }

    /// Merge the active piece into the grid and spawn the next one
    pub fn finish_fall(&mut self) {
        if !self.is_running() {
            return;
        }
        self.capture(|e| e.land());
    }

    /// Shift the piece one column; `direction` is read by sign.
    ///
    /// Records the action time even when the move is rejected. Returns whether
    /// the piece moved.
    pub fn move_piece(&mut self, direction: i8, now: Duration) -> bool {
        if !self.is_running() {
            return false;
        }
        self.last_action_at = now;

        self.capture(|e| {
            let Some(p) = e.current else {
                return false;
            };
            let dx = match direction.signum() {
                1 if p.x + p.width() < GRID_WIDTH as i8 => 1,
                -1 if p.x > 0 => -1,
                _ => return false,
            };

            e.shift(dx, 0);
            if e.valid() {
                return true;
            }
            e.shift(-dx, 0);
            false
        })
    }

    /// Rotate the piece by `direction` quarter turns (positive = clockwise).
    ///
    /// An invalid result is rotated straight back, leaving the piece exactly as
    /// it was. Returns whether the rotation stuck.
    pub fn rotate_piece(&mut self, direction: i8, now: Duration) -> bool {
        if !self.is_running() {
            return false;
        }
        self.last_action_at = now;
        if direction.rem_euclid(4) == 0 {
            return false;
        }

        self.capture(|e| {
            let Some(p) = e.current.as_mut() else {
                return false;
            };
            p.rotate(direction);
            if e.valid() {
                return true;
            }
            if let Some(p) = e.current.as_mut() {
                p.rotate(direction.wrapping_neg());
            }
            false
        })
    }

    /// Hard drop: fall to the lowest valid row and land immediately, bypassing
    /// the lock grace period.
    pub fn drop_piece(&mut self, now: Duration) -> bool {
        if !self.is_running() {
            return false;
        }
        self.last_action_at = now;

        self.capture(|e| {
            if e.current.is_none() {
                return false;
            }
            while e.valid() {
                e.shift(0, -1);
            }
            e.shift(0, 1);
            e.land();
            true
        })
    }

    /// Apply a player action. Returns whether it changed the piece.
    pub fn apply_action(&mut self, action: GameAction, now: Duration) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1, now),
            GameAction::MoveRight => self.move_piece(1, now),
            GameAction::RotateCw => self.rotate_piece(1, now),
            GameAction::RotateCcw => self.rotate_piece(-1, now),
            GameAction::Drop => self.drop_piece(now),
        }
    }

    /// Take every delta queued since the last call
    pub fn pop_delta(&mut self) -> Vec<CellDelta> {
        std::mem::take(&mut self.pending)
    }

    /// Take every event recorded since the last call
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run `op` inside one delta-capture window
    fn capture<R>(&mut self, op: impl FnOnce(&mut Self) -> R) -> R {
        let before = self.occupancy();
        let ret = op(self);
        let after = self.occupancy();
        delta::diff(&before, &after, &mut self.pending);
        ret
    }

    fn shift(&mut self, dx: i8, dy: i8) {
        if let Some(p) = self.current.as_mut() {
            p.x += dx;
            p.y += dy;
        }
    }

    /// Merge the piece into the grid, tagged with its own kind, then spawn.
    fn land(&mut self) {
        let Some(piece) = self.current else {
            return;
        };

        // A piece sticking out of the top cannot be stored: lock out.
        if !self.grid.lock_cells(&piece.cells(), piece.kind()) {
            self.enter_game_over();
            return;
        }

        self.landed += 1;
        self.events.push(EngineEvent::Landed {
            kind: piece.kind(),
            landed: self.landed,
        });

        self.current = Some(self.spawner.spawn());
        if !self.valid() {
            // Block out: the fresh piece overlaps the stack.
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        self.status = EngineStatus::GameOver;
        self.next_tick_at = None;
        self.events.push(EngineEvent::GameOver {
            landed: self.landed,
        });
    }
}
