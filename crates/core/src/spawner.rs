//! Random piece spawner
//!
//! Draws a catalog entry uniformly at random and places it at the top centre
//! of the grid.

use crate::catalog::CATALOG;
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::types::PieceKind;

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: SimpleRng,
}

impl Spawner {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next piece kind, uniformly over the catalog
    pub fn next_kind(&mut self) -> PieceKind {
        let index = self.rng.next_range(CATALOG.len() as u32) as usize;
        CATALOG[index].kind
    }

    /// Draw a kind and return it as a freshly spawned piece
    pub fn spawn(&mut self) -> Piece {
        Piece::spawn(self.next_kind())
    }
}
