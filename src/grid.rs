use serde::Deserialize;
use serde::Serialize;

/// The cell states sent by the server.
///
/// Rows run top to bottom and each row runs left to right. `true` means the cell is alive. The
/// wire format is a plain JSON array of arrays of booleans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridMatrix {
    rows: Vec<Vec<bool>>,
}

impl GridMatrix {
    /// A matrix with no rows. This is what a failed grid request turns into.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A `rows` by `cols` matrix of dead cells
    pub fn dead(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![vec![false; cols]; rows],
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the first row, or 0 when there are no rows
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the matrix has exactly `rows` rows and its first row has exactly `cols` cells
    pub fn has_shape(&self, (rows, cols): (usize, usize)) -> bool {
        self.row_count() == rows && self.column_count() == cols
    }

    /// Cell at column `x` of row `y`. Anything outside the matrix is dead.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = alive;
        }
    }

    /// Iterates over the `(x, y)` coordinates of alive cells in row-major order, reading at most
    /// `cols` cells from each row
    pub fn alive_cells(&self, cols: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .take(cols)
                .enumerate()
                .filter(|&(_, &alive)| alive)
                .map(move |(x, _)| (x, y))
        })
    }

    pub fn population(&self) -> usize {
        self.rows.iter().flatten().filter(|&&alive| alive).count()
    }
}

impl From<serde_json::Value> for GridMatrix {
    /// Any JSON value that is not an array of arrays of booleans becomes the empty matrix, which
    /// never has the expected shape.
    fn from(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

impl From<Vec<Vec<bool>>> for GridMatrix {
    fn from(rows: Vec<Vec<bool>>) -> Self {
        Self { rows }
    }
}
