use super::Player;
use crate::error::{MoveError, SetupError};

pub const DEFAULT_HEIGHT: usize = 6;
pub const DEFAULT_WIDTH: usize = 7;

/// Number of aligned pieces needed to win.
pub const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Board size, fixed for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub height: usize,
    pub width: usize,
}

impl Dimensions {
    pub fn new(height: usize, width: usize) -> Result<Self, SetupError> {
        if height == 0 || width == 0 {
            return Err(SetupError::InvalidDimensions { height, width });
        }
        Ok(Dimensions { height, width })
    }

    pub fn cell_count(&self) -> usize {
        self.height * self.width
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Dimensions {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
        }
    }
}

/// Directions a winning ray can extend from its starting cell, in scan order:
/// rightward, downward, down-right, down-left. Offsets are (row, col).
pub const RAY_DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A grid of cells indexed `[row][col]`. Row 0 is the top, row `height - 1`
/// is the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dims: Dimensions,
    grid: Vec<Vec<Cell>>,
    filled: usize,
}

impl Board {
    /// Create a new empty board
    pub fn new(dims: Dimensions) -> Self {
        Board {
            dims,
            grid: vec![vec![Cell::Empty; dims.width]; dims.height],
            filled: 0,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn height(&self) -> usize {
        self.dims.height
    }

    pub fn width(&self) -> usize {
        self.dims.width
    }

    /// Get the cell at a specific position. Coordinates outside the board
    /// read as empty.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.grid
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(Cell::Empty)
    }

    /// Who occupies `(row, col)`, if anyone.
    pub fn occupant_at(&self, row: usize, col: usize) -> Option<Player> {
        self.get(row, col).player()
    }

    /// Validate a requested column against the board width.
    pub fn column_index(&self, col: isize) -> Result<usize, MoveError> {
        usize::try_from(col)
            .ok()
            .filter(|&c| c < self.dims.width)
            .ok_or(MoveError::InvalidColumn {
                column: col,
                width: self.dims.width,
            })
    }

    /// Scan column `col` from the bottom row upward and return the first
    /// empty row, or `None` when the column is full.
    pub fn find_landing_row(&self, col: isize) -> Result<Option<usize>, MoveError> {
        let col = self.column_index(col)?;
        Ok((0..self.dims.height)
            .rev()
            .find(|&row| self.grid[row][col].is_empty()))
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= self.dims.width || !self.grid[0][col].is_empty()
    }

    /// Mark `(row, col)` as occupied by `player`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of range, already occupied, or would float
    /// above an empty cell. Rows must come from [`Board::find_landing_row`].
    pub fn place(&mut self, row: usize, col: usize, player: Player) {
        assert!(
            row < self.dims.height && col < self.dims.width,
            "placement ({row}, {col}) is outside a {}x{} board",
            self.dims.height,
            self.dims.width
        );
        assert!(
            self.grid[row][col].is_empty(),
            "cell ({row}, {col}) is already occupied"
        );
        assert!(
            row + 1 == self.dims.height || !self.grid[row + 1][col].is_empty(),
            "placement ({row}, {col}) would float above an empty cell"
        );

        self.grid[row][col] = Cell::Occupied(player);
        self.filled += 1;
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.filled == self.dims.cell_count()
    }

    /// Number of occupied cells.
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// The four cells of the ray starting at `(row, col)` in `direction`, or
    /// `None` if any of them falls off the board.
    fn ray(
        &self,
        row: usize,
        col: usize,
        (dr, dc): (isize, isize),
    ) -> Option<[(usize, usize); CONNECT]> {
        let mut cells = [(0, 0); CONNECT];
        for (step, slot) in cells.iter_mut().enumerate() {
            let r = row.checked_add_signed(dr * step as isize)?;
            let c = col.checked_add_signed(dc * step as isize)?;
            if r >= self.dims.height || c >= self.dims.width {
                return None;
            }
            *slot = (r, c);
        }
        Some(cells)
    }

    /// Scan every cell in row-major order and every direction in
    /// [`RAY_DIRECTIONS`] order for four cells held by `player`. Returns the
    /// first matching ray.
    pub fn find_line(&self, player: Player) -> Option<[(usize, usize); CONNECT]> {
        let target = Cell::Occupied(player);
        for row in 0..self.dims.height {
            for col in 0..self.dims.width {
                if self.grid[row][col] != target {
                    continue;
                }
                for direction in RAY_DIRECTIONS {
                    if let Some(cells) = self.ray(row, col, direction) {
                        if cells.iter().all(|&(r, c)| self.grid[r][c] == target) {
                            return Some(cells);
                        }
                    }
                }
            }
        }
        None
    }

    /// Check whether `player` has four in a row anywhere on the board
    pub fn check_for_win(&self, player: Player) -> bool {
        self.find_line(player).is_some()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Dimensions::default())
    }
}
