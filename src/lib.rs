//! Constrained Longest Common Subsequence (CLCS)
//!
//! Given sequences `a` and `b` and a constraint `c`, find a longest sequence
//! that is a subsequence of both `a` and `b` and contains `c` as a
//! subsequence. With an empty constraint this is the classical LCS.
//!
//! ## Core idea
//! 1. Extend the two-sequence LCS table with a *progress* dimension `k`:
//!    the number of constraint symbols already embedded, in order.
//! 2. Fill the `(r+1) x (n+1) x (m+1)` table level by level; cells that no
//!    choice of symbols can reach hold `None` rather than a sentinel.
//! 3. Walk the table backwards from `(r, n, m)` under a fixed transition
//!    priority to recover one optimal solution.
//!
//! A separate [`oracle`] re-checks any candidate against the three
//! subsequence constraints from scratch, without touching a table.
//!
//! ## Quick start
//! ```
//! use clcs_dp::{ClcsEngine, ClcsProblem};
//!
//! let problem = ClcsProblem::new(b"ACCGGTCGAG", b"GTCGTTCGGA", b"GTC");
//! let (len, solution) = ClcsEngine::new(problem).run().unwrap();
//! assert_eq!(len, Some(solution.len() as u32));
//! assert!(problem.is_feasible(&solution));
//! ```
//!
//! The three operations are also available as free functions:
//! [`table::build`], [`backtrack::reconstruct`] and [`oracle::is_feasible`].
//!
//! ## Cost
//! Time and memory are both `O(n * m * r)`. Engines refuse tables above a
//! configurable cell limit (see [`ClcsEngineBuilder::with_cell_limit`]).

pub mod backtrack;
pub mod builder;
pub mod engine;
pub mod error;
pub mod oracle;
pub mod problem;
pub mod table;
pub mod utils;

pub use crate::builder::ClcsEngineBuilder;
pub use crate::engine::{solve_batch, ClcsEngine, ClcsOutput};
pub use crate::error::{ClcsError, Result};
pub use crate::problem::ClcsProblem;
pub use crate::table::{Cell, DpTable, TableDims};
