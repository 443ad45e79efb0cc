//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that is diffed and flushed to the terminal.
//!
//! - [`block_view`]: delta-fed grid picture plus side panel and overlays
//! - [`fb`]: styled character framebuffer
//! - [`renderer`]: crossterm backend with run-length diffing

pub mod block_view;
pub mod fb;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use block_view::{BlockView, Hud, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
