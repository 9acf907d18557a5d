//! Pieces tests - canonical shapes, spawn placement, and the kick resolver

use neon_tetris::core::{collides, ghost_y, lock, try_rotate, Grid, Piece};
use neon_tetris::types::{PieceKind, Shape, KICK_OFFSETS};

// ============== Shape Tests ==============

#[test]
fn test_canonical_shapes() {
    assert_eq!(PieceKind::I.shape(), Shape::from_rows(&[&[1, 1, 1, 1]]));
    assert_eq!(PieceKind::O.shape(), Shape::from_rows(&[&[1, 1], &[1, 1]]));
    assert_eq!(
        PieceKind::S.shape(),
        Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]])
    );
    assert_eq!(
        PieceKind::J.shape(),
        Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]])
    );
}

#[test]
fn test_i_rotates_to_column() {
    let column = PieceKind::I.shape().rotate_cw();
    assert_eq!((column.width(), column.height()), (1, 4));
    assert_eq!(column.cells().collect::<Vec<_>>(), [(0, 0), (0, 1), (0, 2), (0, 3)]);
}

#[test]
fn test_o_rotation_is_identity() {
    let o = PieceKind::O.shape();
    assert_eq!(o.rotate_cw(), o);
}

#[test]
fn test_four_rotations_restore_every_shape() {
    for kind in PieceKind::ALL {
        let shape = kind.shape();
        let back = shape.rotate_cw().rotate_cw().rotate_cw().rotate_cw();
        assert_eq!(back, shape, "{:?}", kind);
    }
}

// ============== Spawn Tests ==============

#[test]
fn test_spawn_is_centred_on_top_row() {
    for kind in PieceKind::ALL {
        let piece = Piece::spawn(kind);
        assert_eq!(piece.y, 0);
        assert_eq!(piece.x, 5 - (kind.shape().width() / 2) as i8, "{:?}", kind);
        assert!(!collides(&piece, &Grid::new(), 0, 0));
    }
}

#[test]
fn test_spawned_shape_is_independent_copy() {
    let mut piece = Piece::spawn(PieceKind::T);
    piece.shape = piece.shape.rotate_cw();
    assert_eq!(Piece::spawn(PieceKind::T).shape, PieceKind::T.shape());
}

// ============== Kick Tests ==============

#[test]
fn test_rotation_without_kick_in_open_space() {
    let piece = Piece::spawn(PieceKind::L);
    let (shape, kick) = try_rotate(&piece, &Grid::new()).unwrap();
    assert_eq!(kick, 0);
    assert_eq!(shape, PieceKind::L.shape().rotate_cw());
}

#[test]
fn test_vertical_i_kicks_two_off_the_right_wall() {
    let mut piece = Piece::spawn(PieceKind::I);
    piece.shape = piece.shape.rotate_cw();
    piece.x = 9;
    piece.y = 5;
    // Flat I spans x..x+3; from x=9 the first fit is x=6, which is not in the table
    assert!(try_rotate(&piece, &Grid::new()).is_none());

    piece.x = 8;
    let (_, kick) = try_rotate(&piece, &Grid::new()).unwrap();
    assert_eq!(kick, -2);
    assert!(KICK_OFFSETS.contains(&kick));
}

#[test]
fn test_kick_order_prefers_left() {
    let mut grid = Grid::new();
    let mut piece = Piece::spawn(PieceKind::I);
    piece.y = 5;
    // The column at x=3 is blocked; x=2 and x=4 are both free
    grid.set(3, 7, Some(PieceKind::Z));
    let (_, kick) = try_rotate(&piece, &grid).unwrap();
    assert_eq!(kick, -1);
}

// ============== Drop Tests ==============

#[test]
fn test_ghost_rests_on_stack() {
    let mut grid = Grid::new();
    grid.fill_row(15, PieceKind::Z);
    let piece = Piece::spawn(PieceKind::O);
    assert_eq!(ghost_y(&piece, &grid), 13);
}

#[test]
fn test_lock_writes_kind() {
    let mut grid = Grid::new();
    let mut piece = Piece::spawn(PieceKind::S);
    piece.y = ghost_y(&piece, &grid);
    lock(&piece, &mut grid);
    assert_eq!(grid.filled_count(), 4);
    assert_eq!(grid.row_string(19), "....SS....");
    assert_eq!(grid.row_string(18), ".....SS...");
}

#[test]
fn test_collision_free_lock_never_overwrites() {
    use neon_tetris::core::SimpleRng;

    let mut rng = SimpleRng::new(77);
    for _ in 0..500 {
        let mut grid = Grid::new();
        for _ in 0..60 {
            let x = rng.next_range(10) as i8;
            let y = rng.next_range(20) as i8;
            grid.set(x, y, Some(PieceKind::Z));
        }
        let kind = PieceKind::ALL[rng.next_range(7) as usize];
        let mut piece = Piece::spawn(kind);
        for _ in 0..rng.next_range(4) {
            piece.shape = piece.shape.rotate_cw();
        }
        piece.x = rng.next_range(10) as i8 - 1;
        piece.y = rng.next_range(22) as i8 - 2;

        if collides(&piece, &grid, 0, 0) {
            continue;
        }
        let visible = piece.cells().filter(|&(_, y)| y >= 0).count();
        let before = grid.filled_count();
        lock(&piece, &mut grid);
        assert_eq!(grid.filled_count(), before + visible, "{:?}", piece);
    }
}
