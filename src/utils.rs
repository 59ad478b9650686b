//! Assorted utilities and helpers.

use crate::error::{ClcsError, Result};
use crate::table::TableDims;

/// Default cap on table cells an engine will allocate (2^26 ≈ 67M cells).
pub const DEFAULT_CELL_LIMIT: usize = 1 << 26;

/// Number of cells a table of shape `dims` needs, saturating at `usize::MAX`.
#[inline]
pub fn saturating_cell_count(dims: TableDims) -> usize {
    dims.cell_count().unwrap_or(usize::MAX)
}

/// Accept a user-supplied cell limit, rejecting zero.
pub(crate) fn check_cell_limit(limit: usize) -> Result<usize> {
    if limit == 0 {
        return Err(ClcsError::InvalidArgument("cell limit must be positive"));
    }
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_cells_of_small_tables() {
        assert_eq!(saturating_cell_count(TableDims::new(1, 1, 1)), 1);
        assert_eq!(saturating_cell_count(TableDims::new(3, 11, 21)), 693);
    }

    #[test]
    fn saturates_on_overflow() {
        let dims = TableDims::new(usize::MAX / 2, 3, 1);
        assert_eq!(saturating_cell_count(dims), usize::MAX);
    }

    #[test]
    fn zero_limit_is_invalid() {
        assert_eq!(
            check_cell_limit(0),
            Err(ClcsError::InvalidArgument("cell limit must be positive"))
        );
        assert_eq!(check_cell_limit(1), Ok(1));
    }

    #[test]
    fn default_limit_admits_moderate_inputs() {
        let dims = TableDims::new(9, 1025, 1025);
        assert!(saturating_cell_count(dims) <= DEFAULT_CELL_LIMIT);
    }
}
