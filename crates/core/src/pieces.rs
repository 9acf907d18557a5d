//! Pieces module - the active piece and the collision/kick resolver
//!
//! Rotation is a plain matrix rotation followed by a horizontal kick search
//! over [`KICK_OFFSETS`]. There are no per-orientation kick tables and no
//! vertical kicks.

use crate::grid::Grid;
use crate::types::{PieceKind, Shape, GRID_HEIGHT, GRID_WIDTH, KICK_OFFSETS};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Current rotation matrix (an independent copy of the canonical shape)
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece at the canonical spawn offset: horizontally centred, top row
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = kind.shape();
        Self {
            kind,
            shape,
            x: (GRID_WIDTH / 2) as i8 - (shape.width() / 2) as i8,
            y: 0,
        }
    }

    /// Absolute grid positions of the filled cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// True if `piece` shifted by `(dx, dy)` leaves the grid sideways or below, or
/// overlaps a filled cell. Cells above the top edge are only checked sideways.
pub fn collides(piece: &Piece, grid: &Grid, dx: i8, dy: i8) -> bool {
    piece.cells().any(|(x, y)| {
        let (x, y) = (x + dx, y + dy);
        if x < 0 || x >= GRID_WIDTH as i8 || y >= GRID_HEIGHT as i8 {
            return true;
        }
        y >= 0 && grid.is_occupied(x, y)
    })
}

/// Commit every visible cell of `piece` into the grid
pub fn lock(piece: &Piece, grid: &mut Grid) {
    grid.lock_cells(piece.cells(), piece.kind);
}

/// Try to rotate clockwise with horizontal kicks.
///
/// Returns the new shape and the accepted kick offset, or None if every offset
/// collides.
pub fn try_rotate(piece: &Piece, grid: &Grid) -> Option<(Shape, i8)> {
    let rotated = Piece {
        shape: piece.shape.rotate_cw(),
        ..*piece
    };

    KICK_OFFSETS
        .iter()
        .copied()
        .find(|&kick| !collides(&rotated, grid, kick, 0))
        .map(|kick| (rotated.shape, kick))
}

/// Lowest y the piece can reach by falling straight down
pub fn ghost_y(piece: &Piece, grid: &Grid) -> i8 {
    let mut drop_distance: i8 = 0;
    while !collides(piece, grid, 0, drop_distance + 1) {
        drop_distance += 1;
    }
    piece.y + drop_distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_offsets() {
        assert_eq!(Piece::spawn(PieceKind::I).x, 3);
        assert_eq!(Piece::spawn(PieceKind::O).x, 4);
        assert_eq!(Piece::spawn(PieceKind::T).x, 4);
        assert_eq!(Piece::spawn(PieceKind::L).y, 0);
    }

    #[test]
    fn test_collides_walls_and_floor() {
        let grid = Grid::new();
        let mut piece = Piece::spawn(PieceKind::I);
        piece.x = 0;
        assert!(!collides(&piece, &grid, 0, 0));
        assert!(collides(&piece, &grid, -1, 0));
        piece.x = 6;
        assert!(collides(&piece, &grid, 1, 0));
        piece.y = 19;
        assert!(collides(&piece, &grid, 0, 1));
    }

    #[test]
    fn test_cells_above_top_do_not_collide_with_occupancy() {
        let grid = Grid::from_rows(&["OOOOOOOOO."]);
        let mut piece = Piece::spawn(PieceKind::O);
        piece.y = -2;
        assert!(!collides(&piece, &grid, 0, 0));
        assert!(!collides(&piece, &grid, 0, 1));
    }

    #[test]
    fn test_rotate_rejected_when_boxed_in() {
        // Vertical I in a one-wide well: every kick collides.
        let mut grid = Grid::new();
        for y in 0..20 {
            for x in 0..10 {
                if x != 5 {
                    grid.set(x, y, Some(PieceKind::Z));
                }
            }
        }
        let piece = Piece {
            kind: PieceKind::I,
            shape: PieceKind::I.shape().rotate_cw(),
            x: 5,
            y: 10,
        };
        assert!(try_rotate(&piece, &grid).is_none());
    }

    #[test]
    fn test_ghost_y_on_empty_grid() {
        let grid = Grid::new();
        let piece = Piece::spawn(PieceKind::T);
        assert_eq!(ghost_y(&piece, &grid), 18);
    }
}
