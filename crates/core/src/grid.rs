//! Grid module - the fixed 10x20 playfield
//!
//! Each cell is empty or holds the kind of the piece that was locked there.
//! Uses a flat array for cache locality and zero-allocation row compaction.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// Row indices, at most one entry per grid row
pub type RowSet = ArrayVec<u8, { GRID_HEIGHT as usize }>;

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * GRID_WIDTH as usize;
        &self.cells[start..start + GRID_WIDTH as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < GRID_HEIGHT as usize && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Check if a row has no filled cells
    pub fn is_row_empty(&self, y: usize) -> bool {
        y < GRID_HEIGHT as usize && self.row(y).iter().all(|cell| cell.is_none())
    }

    /// Indices of all complete rows, top to bottom
    pub fn full_rows(&self) -> RowSet {
        (0..GRID_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .map(|y| y as u8)
            .collect()
    }

    /// Remove the given rows and compact the rest downwards.
    ///
    /// Surviving rows keep their relative order; one empty row is inserted at
    /// the top for every removed row. Out-of-range and duplicate indices are ignored.
    /// Returns the number of rows removed.
    pub fn remove_rows(&mut self, rows: &[u8]) -> usize {
        let width = GRID_WIDTH as usize;
        let mut write_y = GRID_HEIGHT as usize;

        // Scan from bottom to top, copying survivors into place
        for read_y in (0..GRID_HEIGHT as usize).rev() {
            if rows.contains(&(read_y as u8)) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }
        write_y
    }

    /// Remove the bottom `count` rows regardless of their contents.
    ///
    /// Everything above shifts down by `count`; empty rows fill the top.
    pub fn remove_bottom_rows(&mut self, count: usize) -> usize {
        let height = GRID_HEIGHT as usize;
        let count = count.min(height);
        let rows: ArrayVec<u8, { GRID_HEIGHT as usize }> =
            ((height - count)..height).map(|y| y as u8).collect();
        self.remove_rows(&rows)
    }

    /// Write a piece's filled cells at the given absolute positions.
    ///
    /// Cells above the top edge are skipped; other out-of-bounds cells are ignored.
    pub fn lock_cells(&mut self, cells: impl IntoIterator<Item = (i8, i8)>, kind: PieceKind) {
        for (x, y) in cells {
            if y < 0 {
                continue;
            }
            self.set(x, y, Some(kind));
        }
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write piece codes (0 = empty) into a row-major u8 grid
    pub fn write_u8_grid(&self, out: &mut [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * GRID_WIDTH as usize + x].map_or(0, |k| k.code());
            }
        }
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Fill a whole row with one kind
    pub fn fill_row(&mut self, y: i8, kind: PieceKind) {
        for x in 0..GRID_WIDTH as i8 {
            self.set(x, y, Some(kind));
        }
    }

    /// Build a grid from text rows (`.` empty, a piece letter filled),
    /// aligned to the bottom of the grid.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut grid = Self::new();
        let offset = GRID_HEIGHT as usize - rows.len().min(GRID_HEIGHT as usize);
        for (i, line) in rows.iter().take(GRID_HEIGHT as usize).enumerate() {
            for (x, ch) in line.chars().take(GRID_WIDTH as usize).enumerate() {
                let cell = PieceKind::from_str(&ch.to_string());
                grid.set(x as i8, (offset + i) as i8, cell);
            }
        }
        grid
    }

    /// Render one row as text (`.` empty, uppercase letter filled)
    pub fn row_string(&self, y: usize) -> String {
        if y >= GRID_HEIGHT as usize {
            return String::new();
        }
        self.row(y)
            .iter()
            .map(|c| match c {
                Some(k) => k.as_str().to_ascii_uppercase(),
                None => ".".to_string(),
            })
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 0), Some(9));
        assert_eq!(Grid::index(0, 1), Some(10));
        assert_eq!(Grid::index(9, 19), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 20), None);
    }

    #[test]
    fn test_remove_middle_row_preserves_order() {
        let mut grid = Grid::from_rows(&[
            "s.........",
            "IIIIIIIIII",
            "..t.......",
            "IIIIIIIIII",
            "...j......",
        ]);
        // rows 15..19: s, full, t, full, j
        let removed = grid.remove_rows(&[16, 18]);
        assert_eq!(removed, 2);
        assert_eq!(grid.row_string(17), "S.........");
        assert_eq!(grid.row_string(18), "..T.......");
        assert_eq!(grid.row_string(19), "...J......");
        assert!(grid.is_row_empty(15));
        assert!(grid.is_row_empty(16));
    }

    #[test]
    fn test_remove_bottom_rows_ignores_occupancy() {
        let mut grid = Grid::from_rows(&["o.........", "..........", "z........."]);
        grid.remove_bottom_rows(3);
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn test_lock_cells_skips_above_top() {
        let mut grid = Grid::new();
        grid.lock_cells([(0, -1), (1, -1), (0, 0), (1, 0)], PieceKind::O);
        assert_eq!(grid.filled_count(), 2);
        assert!(grid.is_occupied(0, 0));
        assert!(grid.is_occupied(1, 0));
    }

    #[test]
    fn test_write_u8_grid() {
        let mut grid = Grid::new();
        grid.set(3, 19, Some(PieceKind::L));
        let mut out = [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        grid.write_u8_grid(&mut out);
        assert_eq!(out[19][3], PieceKind::L.code());
        assert_eq!(out[0][0], 0);
    }
}
