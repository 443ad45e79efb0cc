//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, event journal).
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 22 rows (indexed 0-21, bottom to top)
//! - **Hidden rows**: the top 2 rows are never drawn; pieces spawn there
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_INTERVAL_MS` | 500 | Gravity: one row per tick |
//! | `LOCK_GRACE_MS` | 1000 | Quiet period after a player action before a grounded piece locks |
//! | `FRAME_MS` | 16 | Render/input poll interval of the terminal front end |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Coord, PieceKind, Rotation, GRID_WIDTH, VISIBLE_HEIGHT};
//!
//! let kind = PieceKind::from_index(2).unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.index(), 2);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert!(Coord::new(9, 19).is_visible());
//! assert!(!Coord::new(GRID_WIDTH as i8, 0).is_visible());
//! assert_eq!(VISIBLE_HEIGHT, 20);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells, hidden rows included (22 rows)
pub const GRID_HEIGHT: u8 = 22;

/// Rows at the top of the grid that are never drawn
pub const HIDDEN_ROWS: u8 = 2;

/// Rows the renderer actually draws
pub const VISIBLE_HEIGHT: u8 = GRID_HEIGHT - HIDDEN_ROWS;

/// Default gravity interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 500;

/// Default lock grace period in milliseconds
pub const LOCK_GRACE_MS: u64 = 1000;

/// Terminal frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u64 = 16;


/// The seven piece kinds, in catalog order
///
/// The discriminant order doubles as the occupant id stored in the grid and
/// reported in deltas:
/// - **I** (0): cyan bar
/// - **O** (1): yellow square
/// - **T** (2): magenta
/// - **S** (3): green
/// - **Z** (4): red
/// - **J** (5): blue
/// - **L** (6): orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Catalog index of this kind (0..7)
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Kind at a catalog index, or `None` when out of range
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Convert to lowercase string representation
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_str(), "i");
    /// assert_eq!(PieceKind::O.as_str(), "o");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Orientation of a piece, counted in quarter turns from spawn
///
/// - **North**: spawn orientation
/// - **East**: rotated 90° clockwise
/// - **South**: rotated 180°
/// - **West**: rotated 90° counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotate by a signed number of quarter turns (positive = clockwise)
    pub fn rotate_by(&self, quarter_turns: i8) -> Self {
        let mut r = *self;
        for _ in 0..quarter_turns.unsigned_abs() % 4 {
            r = if quarter_turns > 0 {
                r.rotate_cw()
            } else {
                r.rotate_ccw()
            };
        }
        r
    }
}

/// Player actions accepted by the engine
///
/// Keyboard input is mapped onto these; each one maps to a single engine
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Shift the piece one column left
    MoveLeft,
    /// Shift the piece one column right
    MoveRight,
    /// Rotate the piece 90° clockwise
    RotateCw,
    /// Rotate the piece 90° counter-clockwise
    RotateCcw,
    /// Hard drop: fall to the lowest valid row and lock immediately
    Drop,
}

impl GameAction {
    /// Convert to camelCase string for the event journal
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Drop => "drop",
        }
    }
}

/// Integer cell coordinate; `y = 0` is the bottom row
///
/// Signed so that tentative piece positions just outside the grid can be
/// represented while a move is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// True if the coordinate is inside the grid, hidden rows included
    pub fn in_grid(&self) -> bool {
        self.x >= 0 && self.x < GRID_WIDTH as i8 && self.y >= 0 && self.y < GRID_HEIGHT as i8
    }

    /// True if the coordinate is inside the drawn part of the grid
    pub fn is_visible(&self) -> bool {
        self.in_grid() && self.y < VISIBLE_HEIGHT as i8
    }
}

/// A grid cell: empty, or filled with the kind of piece that occupies it
pub type Cell = Option<PieceKind>;

/// One cell's state transition since the last delta flush
///
/// `occupant == None` means the cell became empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellDelta {
    pub pos: Coord,
    pub occupant: Cell,
}

impl CellDelta {
    pub fn cleared(pos: Coord) -> Self {
        Self { pos, occupant: None }
    }

    pub fn filled(pos: Coord, kind: PieceKind) -> Self {
        Self {
            pos,
            occupant: Some(kind),
        }
    }

    /// Occupant as a catalog index, `-1` for a cleared cell
    pub fn occupant_id(&self) -> i8 {
        self.occupant.map_or(-1, |k| k.index() as i8)
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
