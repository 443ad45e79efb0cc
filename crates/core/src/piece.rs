//! Piece module - the falling piece and its shape matrix
//!
//! A piece is a bounding box origin plus a boolean occupancy matrix. The origin
//! is the bottom-left corner of the bounding box; matrix row 0 is the *top* row
//! of the box, so the catalog strings read the way the piece looks on screen.
//!
//! Rotation regenerates the matrix with a 90° transform and keeps the origin
//! fixed. Validity against the grid is the engine's job; the only helper here
//! is [`Piece::is_valid`], which the engine calls after each tentative change.

use arrayvec::ArrayVec;

use crate::catalog;
use crate::grid::Grid;
use crate::types::{Coord, PieceKind, Rotation, GRID_HEIGHT, GRID_WIDTH};

/// Largest bounding box side supported by the shape matrix
pub const MAX_SHAPE_SIDE: usize = 4;

/// Occupied cells of a piece; never more than a full 4x4 matrix
pub type PieceCells = ArrayVec<Coord, { MAX_SHAPE_SIDE * MAX_SHAPE_SIDE }>;

/// Boolean occupancy matrix of at most 4x4 cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    width: u8,
    height: u8,
    /// rows[row][col]; row 0 is the top of the bounding box
    rows: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl ShapeMatrix {
    /// Build a matrix from rows of `X` (filled) and `.` (empty), top row first.
    ///
    /// Panics on an empty, ragged, or oversized template: the catalog is fixed
    /// at compile time, so a bad row is a programming error.
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(
            !rows.is_empty() && rows.len() <= MAX_SHAPE_SIDE,
            "shape must have 1..={} rows, got {}",
            MAX_SHAPE_SIDE,
            rows.len()
        );
        let width = rows[0].len();
        assert!(
            width > 0 && width <= MAX_SHAPE_SIDE,
            "shape must have 1..={} columns, got {}",
            MAX_SHAPE_SIDE,
            width
        );

        let mut out = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width, "ragged shape row {:?}", row);
            for (c, ch) in row.bytes().enumerate() {
                out[r][c] = ch == b'X';
            }
        }

        Self {
            width: width as u8,
            height: rows.len() as u8,
            rows: out,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the cell at (`col`, `row`) is filled; out-of-box reads are empty
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.width as usize && row < self.height as usize && self.rows[row][col]
    }

    /// The matrix turned 90° clockwise
    pub fn rotated_cw(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut rows = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        // New box is h wide and w tall.
        for (r, row) in rows.iter_mut().enumerate().take(w) {
            for (c, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.rows[h - 1 - c][r];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            rows,
        }
    }

    /// The matrix turned 90° counter-clockwise
    pub fn rotated_ccw(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut rows = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (r, row) in rows.iter_mut().enumerate().take(w) {
            for (c, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.rows[c][w - 1 - r];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            rows,
        }
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c)
            .count()
    }
}

/// The active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    /// Left edge of the bounding box
    pub x: i8,
    /// Bottom edge of the bounding box
    pub y: i8,
    kind: PieceKind,
    rotation: Rotation,
    shape: ShapeMatrix,
}

impl Piece {
    /// Create a piece of `kind` in spawn orientation with its origin at (`x`, `y`)
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            x,
            y,
            kind,
            rotation: Rotation::North,
            shape: catalog::template(kind.index() as usize).shape(),
        }
    }

    /// Create a piece horizontally centred in the top rows of the grid
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = catalog::template(kind.index() as usize).shape();
        let (x, y) = spawn_origin(&shape);
        Self::new(kind, x, y)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn shape(&self) -> &ShapeMatrix {
        &self.shape
    }

    /// Width of the current bounding box
    pub fn width(&self) -> i8 {
        self.shape.width() as i8
    }

    /// Height of the current bounding box
    pub fn height(&self) -> i8 {
        self.shape.height() as i8
    }

    /// Grid coordinates covered by the piece
    pub fn cells(&self) -> PieceCells {
        let mut out = PieceCells::new();
        let h = self.shape.height() as usize;
        for row in 0..h {
            for col in 0..self.shape.width() as usize {
                if self.shape.is_filled(col, row) {
                    out.push(Coord::new(
                        self.x + col as i8,
                        self.y + (h - 1 - row) as i8,
                    ));
                }
            }
        }
        out
    }

    /// Rotate in place by `direction` quarter turns (positive = clockwise)
    pub fn rotate(&mut self, direction: i8) {
        for _ in 0..direction.unsigned_abs() % 4 {
            self.shape = if direction > 0 {
                self.shape.rotated_cw()
            } else {
                self.shape.rotated_ccw()
            };
        }
        self.rotation = self.rotation.rotate_by(direction);
    }

    /// Check the bounding box against the walls and floor, then every cell
    /// against the landed blocks.
    ///
    /// The top of the grid is open: a piece may poke above the last row.
    pub fn is_valid(&self, grid: &Grid) -> bool {
        if self.x < 0 || self.y < 0 || self.x + self.width() > GRID_WIDTH as i8 {
            return false;
        }
        !self.cells().iter().any(|&c| grid.is_occupied(c))
    }
}

/// Spawn origin for a shape: `x = W/2 - w/2`, top edge on the top row
pub fn spawn_origin(shape: &ShapeMatrix) -> (i8, i8) {
    let x = (GRID_WIDTH / 2) as i8 - (shape.width() / 2) as i8;
    let y = GRID_HEIGHT as i8 - shape.height() as i8;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_from_rows() {
        let t = ShapeMatrix::from_rows(&[".X.", "XXX"]);
        assert_eq!(t.width(), 3);
        assert_eq!(t.height(), 2);
        assert!(!t.is_filled(0, 0));
        assert!(t.is_filled(1, 0));
        assert!(t.is_filled(0, 1));
        assert_eq!(t.filled_count(), 4);
    }

    #[test]
    #[should_panic(expected = "ragged")]
    fn test_shape_rejects_ragged_rows() {
        ShapeMatrix::from_rows(&["XX", "X"]);
    }

    #[test]
    fn test_rotate_cw_swaps_dimensions() {
        let i = ShapeMatrix::from_rows(&["XXXX"]);
        let r = i.rotated_cw();
        assert_eq!((r.width(), r.height()), (1, 4));
        assert_eq!(r.filled_count(), 4);
    }

    #[test]
    fn test_rotate_cw_layout() {
        // J:        rotated cw:
        // X..       XX
        // XXX       X.
        //           X.
        let j = ShapeMatrix::from_rows(&["X..", "XXX"]);
        assert_eq!(j.rotated_cw(), ShapeMatrix::from_rows(&["XX", "X.", "X."]));
        assert_eq!(j.rotated_ccw(), ShapeMatrix::from_rows(&[".X", ".X", "XX"]));
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let s = ShapeMatrix::from_rows(&[".XX", "XX."]);
        let back = s.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        assert_eq!(back, s);
        assert_eq!(s.rotated_cw().rotated_ccw(), s);
    }

    #[test]
    fn test_piece_rotate_negative_turns_counter_clockwise() {
        let mut p = Piece::new(PieceKind::J, 3, 3);
        let spawn = p.shape;
        p.rotate(-1);
        assert_eq!(p.shape, spawn.rotated_ccw());
        assert_eq!(p.rotation, Rotation::West);

        // Undoing with the opposite direction restores the spawn layout.
        p.rotate(1);
        assert_eq!(p.shape, spawn);
        assert_eq!(p.rotation, Rotation::North);

        p.rotate(-3);
        assert_eq!(p.shape, spawn.rotated_cw());
        assert_eq!(p.rotation, Rotation::East);
    }

    #[test]
    fn test_piece_cells_origin_is_bottom_left() {
        let p = Piece::new(PieceKind::T, 2, 5);
        let cells = p.cells();
        // .X.  -> row y=6
        // XXX  -> row y=5
        assert_eq!(cells.len(), 4);
        assert!(cells.contains(&Coord::new(3, 6)));
        assert!(cells.contains(&Coord::new(2, 5)));
        assert!(cells.contains(&Coord::new(3, 5)));
        assert!(cells.contains(&Coord::new(4, 5)));
    }

    #[test]
    fn test_spawn_is_top_centre() {
        for kind in PieceKind::ALL {
            let p = Piece::spawn(kind);
            assert_eq!(p.x, 5 - p.width() / 2, "{:?}", kind);
            assert_eq!(p.y + p.height(), GRID_HEIGHT as i8, "{:?}", kind);
            assert_eq!(p.rotation(), Rotation::North);
        }
    }

    #[test]
    fn test_rotate_tracks_orientation() {
        let mut p = Piece::spawn(PieceKind::L);
        p.rotate(1);
        assert_eq!(p.rotation(), Rotation::East);
        p.rotate(-1);
        assert_eq!(p.rotation(), Rotation::North);
        p.rotate(-1);
        assert_eq!(p.rotation(), Rotation::West);
    }

    #[test]
    fn test_is_valid_bounds() {
        let grid = Grid::new();
        assert!(Piece::new(PieceKind::O, 0, 0).is_valid(&grid));
        assert!(Piece::new(PieceKind::O, 8, 0).is_valid(&grid));
        assert!(!Piece::new(PieceKind::O, 9, 0).is_valid(&grid));
        assert!(!Piece::new(PieceKind::O, -1, 0).is_valid(&grid));
        assert!(!Piece::new(PieceKind::O, 0, -1).is_valid(&grid));
        // Open top.
        assert!(Piece::new(PieceKind::O, 0, GRID_HEIGHT as i8).is_valid(&grid));
    }

    #[test]
    fn test_is_valid_collision() {
        let mut grid = Grid::new();
        grid.set(Coord::new(1, 1), Some(PieceKind::Z));
        assert!(!Piece::new(PieceKind::O, 0, 0).is_valid(&grid));
        assert!(Piece::new(PieceKind::O, 2, 0).is_valid(&grid));
    }
}
