use crate::error::Result;
use crate::problem::ClcsProblem;
use crate::utils::{check_cell_limit, DEFAULT_CELL_LIMIT};
use crate::ClcsEngine;

/// Configures a [`ClcsEngine`] before it runs.
///
/// ```
/// use clcs_dp::{ClcsEngineBuilder, ClcsProblem};
///
/// let engine = ClcsEngineBuilder::new(ClcsProblem::new(b"ab", b"ab", b"a"))
///     .with_cell_limit(1_000)
///     .with_verification(true)
///     .build()
///     .unwrap();
/// assert_eq!(engine.run().unwrap(), (Some(2), b"ab".to_vec()));
/// ```
pub struct ClcsEngineBuilder<'a, T> {
    problem: ClcsProblem<'a, T>,
    cell_limit: Option<usize>,
    verify: bool,
}

impl<'a, T> ClcsEngineBuilder<'a, T> {
    pub fn new(problem: ClcsProblem<'a, T>) -> Self {
        Self {
            problem,
            cell_limit: None,
            verify: false,
        }
    }

    /// Refuse to allocate tables with more than `cell_limit` cells.
    pub fn with_cell_limit(mut self, cell_limit: usize) -> Self {
        self.cell_limit = Some(cell_limit);
        self
    }

    /// Re-check every solution with the feasibility oracle before returning it.
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn build(self) -> Result<ClcsEngine<'a, T>> {
        let cell_limit = match self.cell_limit {
            Some(limit) => check_cell_limit(limit)?,
            None => DEFAULT_CELL_LIMIT,
        };
        Ok(ClcsEngine::with_config(self.problem, cell_limit, self.verify))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClcsError;

    #[test]
    fn defaults_match_plain_engine() {
        let problem = ClcsProblem::new(b"ab", b"ab", b"");
        let built = ClcsEngineBuilder::new(problem).build().unwrap();
        let plain = ClcsEngine::new(problem);
        assert_eq!(built.cell_limit(), plain.cell_limit());
        assert_eq!(built.verifies(), plain.verifies());
        assert!(!built.verifies());
    }

    #[test]
    fn zero_cell_limit_is_rejected() {
        let problem = ClcsProblem::new(b"ab", b"ab", b"");
        let err = ClcsEngineBuilder::new(problem)
            .with_cell_limit(0)
            .build()
            .err();
        assert_eq!(
            err,
            Some(ClcsError::InvalidArgument("cell limit must be positive"))
        );
    }

    #[test]
    fn options_are_carried_over() {
        let problem = ClcsProblem::new(b"ab", b"ab", b"");
        let engine = ClcsEngineBuilder::new(problem)
            .with_cell_limit(42)
            .with_verification(true)
            .build()
            .unwrap();
        assert_eq!(engine.cell_limit(), 42);
        assert!(engine.verifies());
    }
}
