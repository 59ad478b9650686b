//! CLCS engine: table construction followed by reconstruction.
//!
//! The engine owns one [`ClcsProblem`] and its configuration. A run builds
//! the full `(r+1) x (n+1) x (m+1)` table, reads the optimum off its
//! terminal cell and walks it backwards to recover one optimal solution.
//! The table is dropped when the run returns.

use crate::backtrack;
use crate::error::{ClcsError, Result};
use crate::problem::ClcsProblem;
use crate::table::{self, DpTable};
use crate::utils::{check_cell_limit, saturating_cell_count, DEFAULT_CELL_LIMIT};

/// Outcome of a run: the optimum (`None` if infeasible) and one solution
/// of that length (empty if infeasible).
pub type ClcsOutput<T> = (Option<u32>, Vec<T>);

/// CLCS engine for a given problem instance.
///
/// Typical usage:
/// ```
/// use clcs_dp::{ClcsEngine, ClcsProblem};
///
/// let problem = ClcsProblem::new(b"xay", b"ay", b"y");
/// let (len, solution) = ClcsEngine::new(problem).run().unwrap();
/// assert_eq!(len, Some(2));
/// assert_eq!(solution, b"ay");
/// ```
pub struct ClcsEngine<'a, T> {
    problem: ClcsProblem<'a, T>,
    cell_limit: usize,
    verify: bool,
}

impl<'a, T> ClcsEngine<'a, T> {
    /// Create an engine with the default cell limit and no verification.
    pub fn new(problem: ClcsProblem<'a, T>) -> Self {
        Self::with_config(problem, DEFAULT_CELL_LIMIT, false)
    }

    pub(crate) fn with_config(
        problem: ClcsProblem<'a, T>,
        cell_limit: usize,
        verify: bool,
    ) -> Self {
        Self {
            problem,
            cell_limit,
            verify,
        }
    }

    pub fn problem(&self) -> &ClcsProblem<'a, T> {
        &self.problem
    }

    /// Maximum number of table cells this engine will allocate.
    pub fn cell_limit(&self) -> usize {
        self.cell_limit
    }

    /// Whether runs re-check their solution with the feasibility oracle.
    pub fn verifies(&self) -> bool {
        self.verify
    }
}

impl<'a, T: Clone + PartialEq> ClcsEngine<'a, T> {
    /// Build the table for this instance, refusing shapes over the cell limit.
    pub fn build_table(&self) -> Result<DpTable> {
        let cells = saturating_cell_count(self.problem.dims());
        if cells > self.cell_limit {
            #[cfg(feature = "tracing")]
            tracing::warn!(cells, limit = self.cell_limit, "table exceeds cell limit");
            return Err(ClcsError::TableTooLarge {
                cells,
                limit: self.cell_limit,
            });
        }
        let ClcsProblem { a, b, c } = self.problem;
        Ok(table::build(a, b, c))
    }

    /// Run the full solve.
    ///
    /// Returns `(optimum, solution)`, where `solution.len()` equals the
    /// optimum when one exists and the solution is empty otherwise.
    pub fn run(&self) -> Result<ClcsOutput<T>> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "clcs_run",
            n = self.problem.a.len(),
            m = self.problem.b.len(),
            r = self.problem.c.len()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let table = {
            #[cfg(feature = "tracing")]
            let span = tracing::info_span!("build_table");
            #[cfg(feature = "tracing")]
            let _enter = span.enter();
            self.build_table()?
        };
        let optimum = table.optimum();

        let ClcsProblem { a, b, c } = self.problem;
        let solution = backtrack::reconstruct(a, b, c, &table)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(?optimum, solution_len = solution.len(), "clcs solved");

        if self.verify {
            self.check_solution(optimum, &solution)?;
        }
        Ok((optimum, solution))
    }

    fn check_solution(&self, optimum: Option<u32>, solution: &[T]) -> Result<()> {
        let consistent = match optimum {
            Some(len) => solution.len() == len as usize && self.problem.is_feasible(solution),
            None => solution.is_empty(),
        };
        if consistent {
            Ok(())
        } else {
            Err(ClcsError::InfeasibleSolution)
        }
    }
}

/// Solve many independent instances under one cell limit.
///
/// Results come back in input order. Instances share nothing, so with the
/// `parallel` feature they are spread across the rayon pool. A zero
/// `cell_limit` fails with [`ClcsError::InvalidArgument`] before any
/// instance is solved.
#[cfg(feature = "parallel")]
pub fn solve_batch<T>(
    problems: &[ClcsProblem<'_, T>],
    cell_limit: usize,
) -> Result<Vec<Result<ClcsOutput<T>>>>
where
    T: Clone + PartialEq + Send + Sync,
{
    use rayon::prelude::*;

    let cell_limit = check_cell_limit(cell_limit)?;
    Ok(problems
        .par_iter()
        .map(|&problem| ClcsEngine::with_config(problem, cell_limit, false).run())
        .collect())
}

/// Solve many independent instances under one cell limit.
///
/// Results come back in input order. A zero `cell_limit` fails with
/// [`ClcsError::InvalidArgument`] before any instance is solved.
#[cfg(not(feature = "parallel"))]
pub fn solve_batch<T>(
    problems: &[ClcsProblem<'_, T>],
    cell_limit: usize,
) -> Result<Vec<Result<ClcsOutput<T>>>>
where
    T: Clone + PartialEq,
{
    let cell_limit = check_cell_limit(cell_limit)?;
    Ok(problems
        .iter()
        .map(|&problem| ClcsEngine::with_config(problem, cell_limit, false).run())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClcsEngineBuilder;

    #[test]
    fn run_reports_optimum_and_solution() {
        let engine = ClcsEngine::new(ClcsProblem::new(b"ab", b"ab", b"a"));
        assert_eq!(engine.run().unwrap(), (Some(2), b"ab".to_vec()));
    }

    #[test]
    fn infeasible_instance_is_not_an_error() {
        let engine = ClcsEngine::new(ClcsProblem::new(b"a", b"a", b"aa"));
        assert_eq!(engine.run().unwrap(), (None, Vec::new()));
    }

    #[test]
    fn oversized_table_is_refused() {
        let problem = ClcsProblem::new(b"abcd", b"abcd", b"ab");
        let engine = ClcsEngineBuilder::new(problem)
            .with_cell_limit(74)
            .build()
            .unwrap();
        assert_eq!(
            engine.run(),
            Err(ClcsError::TableTooLarge {
                cells: 75,
                limit: 74
            })
        );

        let engine = ClcsEngineBuilder::new(problem)
            .with_cell_limit(75)
            .build()
            .unwrap();
        assert_eq!(engine.run().unwrap().0, Some(4));
    }

    #[test]
    fn verification_accepts_correct_output() {
        let engine = ClcsEngineBuilder::new(ClcsProblem::new(b"xay", b"ay", b"y"))
            .with_verification(true)
            .build()
            .unwrap();
        assert_eq!(engine.run().unwrap(), (Some(2), b"ay".to_vec()));
    }

    #[test]
    fn check_solution_rejects_wrong_candidates() {
        let engine = ClcsEngine::new(ClcsProblem::new(b"xay", b"ay", b"y"));
        assert!(engine.check_solution(Some(2), b"ay").is_ok());
        assert_eq!(
            engine.check_solution(Some(2), b"xy"),
            Err(ClcsError::InfeasibleSolution)
        );
        assert_eq!(
            engine.check_solution(Some(1), b"ay"),
            Err(ClcsError::InfeasibleSolution)
        );
        assert_eq!(
            engine.check_solution(None, b"y"),
            Err(ClcsError::InfeasibleSolution)
        );
    }

    #[test]
    fn batch_preserves_order() {
        let problems = [
            ClcsProblem::new(&b"ab"[..], b"ab", b"a"),
            ClcsProblem::new(&b"a"[..], b"a", b"aa"),
            ClcsProblem::new(&b"xay"[..], b"ay", b"y"),
        ];
        let results = solve_batch(&problems, DEFAULT_CELL_LIMIT).unwrap();
        let optima: Vec<_> = results.into_iter().map(|r| r.unwrap().0).collect();
        assert_eq!(optima, vec![Some(2), None, Some(2)]);
    }

    #[test]
    fn batch_rejects_zero_cell_limit() {
        let problems = [ClcsProblem::new(&b"ab"[..], b"ab", b"a")];
        assert_eq!(
            solve_batch(&problems, 0),
            Err(ClcsError::InvalidArgument("cell limit must be positive"))
        );
    }

    #[test]
    fn overflowing_shape_is_refused() {
        // Zero-sized symbols let the shape overflow without allocating inputs.
        let units = vec![(); 1 << 22];
        let engine = ClcsEngine::new(ClcsProblem::new(&units, &units, &units));
        assert_eq!(
            engine.run(),
            Err(ClcsError::TableTooLarge {
                cells: usize::MAX,
                limit: DEFAULT_CELL_LIMIT
            })
        );
    }
}
