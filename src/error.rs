//! Error types for CLCS solving.
//!
//! Table construction and the feasibility oracle never fail; errors only
//! arise at the API boundary (bad configuration, mismatched tables, tables
//! over the size limit) or when reconstruction detects a corrupted table.

use thiserror::Error;

use crate::table::TableDims;

/// Errors reported by the engine, the builder and the backtracker.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClcsError {
    /// A configuration value was rejected before any work was done.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The table handed to reconstruction was built for other sequences.
    #[error("table dimensions {found} do not match the input sequences {expected}")]
    DimensionMismatch {
        /// Dimensions implied by the supplied sequences.
        expected: TableDims,
        /// Dimensions of the supplied table.
        found: TableDims,
    },

    /// The table would hold more cells than the configured limit.
    ///
    /// `cells` saturates at `usize::MAX` when the product overflows.
    #[error("table of {cells} cells exceeds the limit of {limit} cells")]
    TableTooLarge { cells: usize, limit: usize },

    /// No backtracking transition explains the value stored at a cell.
    #[error("inconsistent table at level {level}, cell ({row}, {col})")]
    InconsistentTable {
        level: usize,
        row: usize,
        col: usize,
    },

    /// Verification rejected the reconstructed solution.
    #[error("reconstructed solution failed the feasibility check")]
    InfeasibleSolution,
}

/// A specialized `Result` type for CLCS operations.
pub type Result<T> = std::result::Result<T, ClcsError>;
