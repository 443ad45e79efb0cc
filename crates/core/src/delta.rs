//! Delta module - per-cell change tracking for renderers
//!
//! The engine snapshots the occupancy map (landed blocks plus the active piece)
//! before and after each mutating operation and appends the difference to its
//! pending delta list. A renderer that applies every entry in order, last write
//! per cell winning, ends up with exactly the engine's occupancy.

use std::collections::BTreeMap;

use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::{Cell, CellDelta, Coord, PieceKind};

/// Every occupied cell and its occupant
pub type Occupancy = BTreeMap<Coord, PieceKind>;

/// Occupancy of the grid with the active piece drawn on top
pub fn occupancy(grid: &Grid, piece: Option<&Piece>) -> Occupancy {
    let mut out: Occupancy = grid.occupied().collect();
    if let Some(p) = piece {
        out.extend(p.cells().into_iter().map(|c| (c, p.kind())));
    }
    out
}

/// Append the changes that turn `before` into `after`.
///
/// Cells that emptied come first, then cells that gained or changed occupant,
/// each group in coordinate order. An occupant is always the one the cell holds
/// in `after`.
pub fn diff(before: &Occupancy, after: &Occupancy, out: &mut Vec<CellDelta>) {
    out.extend(tag_all(
        before.keys().filter(|c| !after.contains_key(c)).copied(),
        None,
    ));
    out.extend(
        after
            .iter()
            .filter(|&(c, kind)| before.get(c) != Some(kind))
            .map(|(&c, &kind)| CellDelta::filled(c, kind)),
    );
}

/// Pair every coordinate with the same occupant
pub fn tag_all(
    coords: impl IntoIterator<Item = Coord>,
    occupant: Cell,
) -> impl Iterator<Item = CellDelta> {
    coords.into_iter().map(move |pos| CellDelta { pos, occupant })
}

/// Apply deltas onto an occupancy map, last write per cell winning
pub fn replay(deltas: &[CellDelta], into: &mut Occupancy) {
    for d in deltas {
        match d.occupant {
            Some(kind) => {
                into.insert(d.pos, kind);
            }
            None => {
                into.remove(&d.pos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(cells: &[(i8, i8, PieceKind)]) -> Occupancy {
        cells
            .iter()
            .map(|&(x, y, k)| (Coord::new(x, y), k))
            .collect()
    }

    #[test]
    fn test_diff_reports_cleared_then_filled() {
        let before = occ(&[(0, 0, PieceKind::I), (1, 0, PieceKind::I)]);
        let after = occ(&[(1, 0, PieceKind::I), (2, 0, PieceKind::I)]);

        let mut out = Vec::new();
        diff(&before, &after, &mut out);

        assert_eq!(
            out,
            vec![
                CellDelta::cleared(Coord::new(0, 0)),
                CellDelta::filled(Coord::new(2, 0), PieceKind::I),
            ]
        );
    }

    #[test]
    fn test_diff_reports_occupant_change() {
        let before = occ(&[(4, 20, PieceKind::T)]);
        let after = occ(&[(4, 20, PieceKind::O)]);

        let mut out = Vec::new();
        diff(&before, &after, &mut out);
        assert_eq!(out, vec![CellDelta::filled(Coord::new(4, 20), PieceKind::O)]);
    }

    #[test]
    fn test_diff_of_identical_states_is_empty() {
        let s = occ(&[(3, 3, PieceKind::S)]);
        let mut out = Vec::new();
        diff(&s, &s, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_occupancy_piece_overrides_grid() {
        let mut grid = Grid::new();
        grid.set(Coord::new(0, 0), Some(PieceKind::Z));
        let piece = Piece::new(PieceKind::O, 0, 0);

        let o = occupancy(&grid, Some(&piece));
        assert_eq!(o.len(), 4);
        assert_eq!(o[&Coord::new(0, 0)], PieceKind::O);

        let o = occupancy(&grid, None);
        assert_eq!(o.len(), 1);
    }

    #[test]
    fn test_replay_of_diff_reaches_target() {
        let before = occ(&[(0, 0, PieceKind::I), (5, 5, PieceKind::L)]);
        let after = occ(&[(5, 5, PieceKind::J), (6, 6, PieceKind::J)]);
        let mut out = Vec::new();
        diff(&before, &after, &mut out);

        let mut state = before.clone();
        replay(&out, &mut state);
        assert_eq!(state, after);
    }

    #[test]
    fn test_tag_all_pairs_each_coord() {
        let tagged: Vec<_> = tag_all([Coord::new(1, 1), Coord::new(2, 2)], None).collect();
        assert_eq!(tagged.len(), 2);
        assert!(tagged.iter().all(|d| d.occupant.is_none()));
    }
}
