//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the grid rules, the piece catalog, and the engine state
//! machine. It has **zero dependencies** on terminals or I/O, making it:
//!
//! - **Deterministic**: Same seed and same timed calls produce identical games
//! - **Testable**: Time is an argument, so lock delay is tested without sleeping
//! - **Portable**: Any front end that can apply cell deltas can draw it
//!
//! # Module Structure
//!
//! - [`catalog`]: The seven piece templates and their colours
//! - [`piece`]: Shape matrices, rotation, and the falling piece
//! - [`grid`]: 10x22 grid of landed blocks
//! - [`spawner`]: Uniformly random piece selection over the catalog
//! - [`delta`]: Occupancy snapshots and the per-cell change list
//! - [`engine`]: Tick, move, rotate, drop, landing, and game over
//! - [`config`]: Timings and seed, overridable from the environment
//!
//! # Game Rules
//!
//! - **No kicks**: A move or rotation that does not fit is reverted
//! - **Lock delay**: A grounded piece lands on the first tick more than the
//!   grace period after the last player action
//! - **Hard drop**: Lands immediately, ignoring the grace period
//! - **No line clears**: Landed blocks stay where they fall
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use blockfall_core::Engine;
//! use blockfall_types::GameAction;
//!
//! let mut engine = Engine::new(12345);
//! engine.start(Duration::ZERO);
//!
//! engine.apply_action(GameAction::MoveRight, Duration::from_millis(100));
//! engine.apply_action(GameAction::Drop, Duration::from_millis(200));
//!
//! assert_eq!(engine.landed(), 1);
//! assert!(!engine.pop_delta().is_empty());
//! ```

pub mod catalog;
pub mod config;
pub mod delta;
pub mod engine;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod spawner;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use catalog::{color_of, template, PieceTemplate, CATALOG};
pub use config::{ConfigError, EngineConfig};
pub use delta::Occupancy;
pub use engine::{Engine, EngineEvent, EngineStatus};
pub use grid::Grid;
pub use piece::{Piece, ShapeMatrix};
pub use rng::SimpleRng;
pub use spawner::Spawner;
