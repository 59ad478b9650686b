//! The three-dimensional CLCS table and its construction.
//!
//! Cell `[k][i][j]` holds the length of the longest common subsequence of
//! `a[0..i]` and `b[0..j]` that contains `c[0..k]` as a subsequence, or
//! `None` when no such subsequence exists.
//!
//! Level `k = 0` is the classical two-sequence LCS table. For `k >= 1` the
//! first row and column are unreachable: no constraint symbol can be embedded
//! against an empty prefix.

use std::fmt;

/// Value of a single table cell. `None` marks an unreachable state.
///
/// `Option`'s ordering puts `None` below every `Some`, so `max` treats an
/// unreachable cell as negative infinity.
pub type Cell = Option<u32>;

/// Shape of a table: `(r + 1) x (n + 1) x (m + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableDims {
    /// Number of progress levels, `r + 1`.
    pub levels: usize,
    /// Number of prefixes of `a`, `n + 1`.
    pub rows: usize,
    /// Number of prefixes of `b`, `m + 1`.
    pub cols: usize,
}

impl TableDims {
    pub fn new(levels: usize, rows: usize, cols: usize) -> Self {
        Self { levels, rows, cols }
    }

    /// Dimensions of the table for sequences `a`, `b` and constraint `c`.
    pub fn of<T>(a: &[T], b: &[T], c: &[T]) -> Self {
        Self::new(c.len() + 1, a.len() + 1, b.len() + 1)
    }

    /// Total number of cells, or `None` if the product overflows `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        self.levels
            .checked_mul(self.rows)
            .and_then(|x| x.checked_mul(self.cols))
    }
}

impl fmt::Display for TableDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.levels, self.rows, self.cols)
    }
}

/// Dense CLCS table, stored level-major then row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DpTable {
    dims: TableDims,
    cells: Vec<Cell>,
}

impl DpTable {
    /// A table of the given shape with every cell unreachable.
    ///
    /// # Panics
    /// Panics if the cell count overflows `usize`.
    pub(crate) fn unreachable(dims: TableDims) -> Self {
        let Some(len) = dims.cell_count() else {
            panic!("table {dims} has more cells than usize can index");
        };
        Self {
            dims,
            cells: vec![None; len],
        }
    }

    #[inline]
    fn index(&self, k: usize, i: usize, j: usize) -> usize {
        debug_assert!(k < self.dims.levels && i < self.dims.rows && j < self.dims.cols);
        (k * self.dims.rows + i) * self.dims.cols + j
    }

    pub fn dims(&self) -> TableDims {
        self.dims
    }

    /// Value at `[k][i][j]`.
    ///
    /// # Panics
    /// Panics if any index is out of range.
    #[inline]
    pub fn get(&self, k: usize, i: usize, j: usize) -> Cell {
        assert!(
            k < self.dims.levels && i < self.dims.rows && j < self.dims.cols,
            "cell ({k}, {i}, {j}) outside table {}",
            self.dims
        );
        self.cells[self.index(k, i, j)]
    }

    #[inline]
    pub(crate) fn set(&mut self, k: usize, i: usize, j: usize, value: Cell) {
        let idx = self.index(k, i, j);
        self.cells[idx] = value;
    }

    /// The terminal cell `[r][n][m]`: the CLCS length, if any solution exists.
    pub fn optimum(&self) -> Cell {
        self.get(
            self.dims.levels - 1,
            self.dims.rows - 1,
            self.dims.cols - 1,
        )
    }

    /// All cells of progress level `k`, row-major over `(i, j)`.
    ///
    /// # Panics
    /// Panics if `k` is out of range.
    pub fn level(&self, k: usize) -> &[Cell] {
        assert!(k < self.dims.levels, "level {k} outside table {}", self.dims);
        let width = self.dims.rows * self.dims.cols;
        &self.cells[k * width..(k + 1) * width]
    }
}

/// Build the CLCS table for `a`, `b` and constraint `c`.
///
/// Levels are filled in increasing order, and within a level rows then
/// columns, so every dependency (`k - 1`, or the same `k` at a smaller
/// `(i, j)`) is already final when a cell is computed.
///
/// Callers that need bounded memory should check [`TableDims::cell_count`]
/// first (the engine does).
///
/// # Panics
/// Panics if `(r + 1) * (n + 1) * (m + 1)` overflows `usize`, which only
/// zero-sized symbol types can reach.
pub fn build<T: PartialEq>(a: &[T], b: &[T], c: &[T]) -> DpTable {
    let dims = TableDims::of(a, b, c);
    let mut table = DpTable::unreachable(dims);
    let (n, m) = (a.len(), b.len());

    // Level 0 edges: LCS against an empty prefix is empty.
    for i in 0..=n {
        table.set(0, i, 0, Some(0));
    }
    for j in 0..=m {
        table.set(0, 0, j, Some(0));
    }

    for k in 0..dims.levels {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("fill_level", level = k);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        // The constraint symbol this level waits for; level 0 waits for none.
        let wanted = k.checked_sub(1).map(|idx| &c[idx]);
        for i in 1..=n {
            let ch = &a[i - 1];
            for j in 1..=m {
                let diag = if *ch == b[j - 1] {
                    match wanted {
                        // Lengths are bounded by min(n, m), so `+ 1` cannot
                        // overflow for any table that fits in memory.
                        Some(w) if ch == w => table.get(k - 1, i - 1, j - 1).map(|v| v + 1),
                        _ => table.get(k, i - 1, j - 1).map(|v| v + 1),
                    }
                } else {
                    None
                };
                let up = table.get(k, i - 1, j);
                let left = table.get(k, i, j - 1);
                table.set(k, i, j, diag.max(up.max(left)));
            }
        }
    }

    table
}
