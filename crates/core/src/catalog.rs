//! Piece catalog - the fixed, ordered set of piece templates
//!
//! Catalog order is the occupant id: the grid stores a [`PieceKind`] and the
//! renderer maps it back to the template's colour.

use crate::piece::ShapeMatrix;
use crate::types::{PieceKind, Rgb};

/// Shape rows (top row first, `X` filled) and colour of one piece type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceTemplate {
    pub kind: PieceKind,
    pub rows: &'static [&'static str],
    pub color: Rgb,
}

impl PieceTemplate {
    /// Spawn-orientation occupancy matrix
    pub fn shape(&self) -> ShapeMatrix {
        ShapeMatrix::from_rows(self.rows)
    }
}

/// All piece templates, indexed by [`PieceKind::index`]
pub const CATALOG: [PieceTemplate; 7] = [
    PieceTemplate {
        kind: PieceKind::I,
        rows: &["XXXX"],
        color: Rgb::new(80, 220, 220),
    },
    PieceTemplate {
        kind: PieceKind::O,
        rows: &["XX", "XX"],
        color: Rgb::new(240, 220, 80),
    },
    PieceTemplate {
        kind: PieceKind::T,
        rows: &[".X.", "XXX"],
        color: Rgb::new(200, 120, 220),
    },
    PieceTemplate {
        kind: PieceKind::S,
        rows: &[".XX", "XX."],
        color: Rgb::new(100, 220, 120),
    },
    PieceTemplate {
        kind: PieceKind::Z,
        rows: &["XX.", ".XX"],
        color: Rgb::new(220, 80, 80),
    },
    PieceTemplate {
        kind: PieceKind::J,
        rows: &["X..", "XXX"],
        color: Rgb::new(80, 120, 220),
    },
    PieceTemplate {
        kind: PieceKind::L,
        rows: &["..X", "XXX"],
        color: Rgb::new(255, 165, 0),
    },
];

/// Template at a catalog index.
///
/// Panics when `index` is out of range; callers derive indices from
/// [`PieceKind`] or from the spawner, so a bad index is a contract violation.
pub fn template(index: usize) -> &'static PieceTemplate {
    assert!(
        index < CATALOG.len(),
        "piece index {} out of range (catalog has {} entries)",
        index,
        CATALOG.len()
    );
    &CATALOG[index]
}

/// Display colour of a piece kind
pub fn color_of(kind: PieceKind) -> Rgb {
    template(kind.index() as usize).color
}
