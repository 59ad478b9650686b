//! Backward reconstruction of one optimal CLCS from a built table.
//!
//! Starting at `(r, n, m)`, each step picks the first transition in
//! [`Step::PRIORITY`] that explains the current cell's value and moves to
//! its predecessor, until either prefix is exhausted. Matches emit a symbol;
//! skips do not. The order is a fixed, deterministic tie-break: among several
//! optimal solutions, the one it reaches is the one returned.

use crate::error::{ClcsError, Result};
use crate::table::{DpTable, TableDims};

/// A table coordinate `(k, i, j)`: progress level, prefix of `a`, prefix of `b`.
pub type ClcsState = (usize, usize, usize);

/// Transitions the backtracker may take, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Matched symbol that also consumes the next constraint symbol.
    AdvanceMatch,
    /// Matched symbol at the same progress level.
    PlainMatch,
    /// Value carried from the shorter prefix of `a`.
    SkipA,
    /// Value carried from the shorter prefix of `b`.
    SkipB,
}

impl Step {
    /// Evaluation order: constraint-advancing match, ordinary match, then
    /// carries, preferring to shorten `a` before `b`.
    pub const PRIORITY: [Step; 4] = [
        Step::AdvanceMatch,
        Step::PlainMatch,
        Step::SkipA,
        Step::SkipB,
    ];

    /// Whether taking this step appends a symbol to the solution.
    pub fn emits(self) -> bool {
        matches!(self, Step::AdvanceMatch | Step::PlainMatch)
    }

    /// State reached by taking this step from `state`.
    ///
    /// Only meaningful for states where [`Step::applies`] holds.
    pub fn predecessor(self, (k, i, j): ClcsState) -> ClcsState {
        match self {
            Step::AdvanceMatch => (k - 1, i - 1, j - 1),
            Step::PlainMatch => (k, i - 1, j - 1),
            Step::SkipA => (k, i - 1, j),
            Step::SkipB => (k, i, j - 1),
        }
    }

    /// Whether this step explains the value stored at `state`.
    ///
    /// Requires `i > 0` and `j > 0`. An unreachable cell is explained by
    /// nothing.
    pub fn applies<T: PartialEq>(
        self,
        a: &[T],
        b: &[T],
        c: &[T],
        table: &DpTable,
        (k, i, j): ClcsState,
    ) -> bool {
        debug_assert!(i > 0 && j > 0);
        let here = table.get(k, i, j);
        if here.is_none() {
            return false;
        }
        let matched = a[i - 1] == b[j - 1];
        match self {
            Step::AdvanceMatch => {
                matched
                    && k > 0
                    && a[i - 1] == c[k - 1]
                    && here == table.get(k - 1, i - 1, j - 1).map(|v| v + 1)
            }
            Step::PlainMatch => matched && here == table.get(k, i - 1, j - 1).map(|v| v + 1),
            Step::SkipA => here == table.get(k, i - 1, j),
            Step::SkipB => here == table.get(k, i, j - 1),
        }
    }
}

/// First step in priority order that applies at `state`, if any.
pub fn next_step<T: PartialEq>(
    a: &[T],
    b: &[T],
    c: &[T],
    table: &DpTable,
    state: ClcsState,
) -> Option<Step> {
    Step::PRIORITY
        .into_iter()
        .find(|step| step.applies(a, b, c, table, state))
}

/// Steps taken from the terminal state, newest last, plus where the walk ended.
struct Walk {
    steps: Vec<(ClcsState, Step)>,
    end: ClcsState,
}

fn inconsistent((level, row, col): ClcsState) -> ClcsError {
    ClcsError::InconsistentTable { level, row, col }
}

fn check_dims<T>(a: &[T], b: &[T], c: &[T], table: &DpTable) -> Result<()> {
    let expected = TableDims::of(a, b, c);
    let found = table.dims();
    if expected != found {
        return Err(ClcsError::DimensionMismatch { expected, found });
    }
    Ok(())
}

/// Walk the table backwards from `(r, n, m)`.
///
/// Returns `None` when the terminal cell is unreachable.
fn walk<T: PartialEq>(a: &[T], b: &[T], c: &[T], table: &DpTable) -> Result<Option<Walk>> {
    check_dims(a, b, c, table)?;
    let Some(target) = table.optimum() else {
        return Ok(None);
    };

    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!("reconstruct", optimum = target);
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let terminal = (c.len(), a.len(), b.len());
    let mut state = terminal;
    let mut steps = Vec::with_capacity(a.len() + b.len());
    let mut emitted = 0u32;
    while state.1 > 0 && state.2 > 0 {
        let step = next_step(a, b, c, table, state).ok_or_else(|| inconsistent(state))?;
        if step.emits() {
            emitted += 1;
        }
        steps.push((state, step));
        state = step.predecessor(state);
    }

    // A consistent walk drains the constraint and accounts for every unit
    // of the optimum.
    if state.0 != 0 {
        return Err(inconsistent(state));
    }
    if emitted != target {
        return Err(inconsistent(terminal));
    }

    Ok(Some(Walk { steps, end: state }))
}

/// Reconstruct one optimal solution from `table`.
///
/// Returns an empty sequence when no feasible solution exists. Fails with
/// [`ClcsError::DimensionMismatch`] if `table` was not built for these
/// sequences and with [`ClcsError::InconsistentTable`] if its values cannot
/// be explained by the recurrence.
pub fn reconstruct<T: Clone + PartialEq>(
    a: &[T],
    b: &[T],
    c: &[T],
    table: &DpTable,
) -> Result<Vec<T>> {
    let Some(walk) = walk(a, b, c, table)? else {
        return Ok(Vec::new());
    };
    Ok(walk
        .steps
        .iter()
        .rev()
        .filter(|(_, step)| step.emits())
        .map(|&((_, i, _), _)| a[i - 1].clone())
        .collect())
}

/// States visited by the reconstruction, in forward order.
///
/// The first state lies on the `i = 0` or `j = 0` edge at level 0 and the
/// last is `(r, n, m)`. Empty when no feasible solution exists.
pub fn reconstruct_path<T: PartialEq>(
    a: &[T],
    b: &[T],
    c: &[T],
    table: &DpTable,
) -> Result<Vec<ClcsState>> {
    let Some(walk) = walk(a, b, c, table)? else {
        return Ok(Vec::new());
    };
    let mut path = Vec::with_capacity(walk.steps.len() + 1);
    path.push(walk.end);
    path.extend(walk.steps.iter().rev().map(|&(state, _)| state));
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::build;

    fn solve(a: &[u8], b: &[u8], c: &[u8]) -> Vec<u8> {
        let table = build(a, b, c);
        reconstruct(a, b, c, &table).unwrap()
    }

    #[test]
    fn priority_order_is_fixed() {
        assert_eq!(
            Step::PRIORITY,
            [Step::AdvanceMatch, Step::PlainMatch, Step::SkipA, Step::SkipB]
        );
        assert!(Step::AdvanceMatch.emits());
        assert!(Step::PlainMatch.emits());
        assert!(!Step::SkipA.emits());
        assert!(!Step::SkipB.emits());
    }

    #[test]
    fn predecessors_move_one_cell() {
        assert_eq!(Step::AdvanceMatch.predecessor((2, 3, 4)), (1, 2, 3));
        assert_eq!(Step::PlainMatch.predecessor((2, 3, 4)), (2, 2, 3));
        assert_eq!(Step::SkipA.predecessor((2, 3, 4)), (2, 2, 4));
        assert_eq!(Step::SkipB.predecessor((2, 3, 4)), (2, 3, 3));
    }

    #[test]
    fn advancing_match_wins_over_plain_match() {
        let (a, b, c) = (b"xay", b"ay", b"y");
        let table = build(a, b, c);
        assert_eq!(next_step(a, b, c, &table, (1, 3, 2)), Some(Step::AdvanceMatch));
        assert_eq!(next_step(a, b, c, &table, (0, 2, 1)), Some(Step::PlainMatch));
    }

    #[test]
    fn carry_prefers_shortening_a() {
        // LCS("ab", "ba") has two optima; the walk shortens `a` first and
        // so settles on "a" rather than "b".
        let (a, b) = (b"ab", b"ba");
        let table = build(a, b, b"");
        assert_eq!(next_step(a, b, b"", &table, (0, 2, 2)), Some(Step::SkipA));
        assert_eq!(solve(a, b, b""), b"a");
    }

    #[test]
    fn unreachable_terminal_gives_empty_solution() {
        assert!(solve(b"a", b"a", b"aa").is_empty());
        let table = build(b"a", b"a", b"aa");
        assert!(reconstruct_path(b"a", b"a", b"aa", &table).unwrap().is_empty());
    }

    #[test]
    fn path_runs_from_edge_to_terminal() {
        let (a, b, c) = (b"xay", b"ay", b"y");
        let table = build(a, b, c);
        let path = reconstruct_path(a, b, c, &table).unwrap();
        assert_eq!(path, vec![(0, 1, 0), (0, 2, 1), (1, 3, 2)]);
    }

    #[test]
    fn mismatched_table_is_rejected() {
        let table = build(b"ab", b"ab", b"a");
        let err = reconstruct(b"ab", b"ab", b"", &table).unwrap_err();
        assert_eq!(
            err,
            ClcsError::DimensionMismatch {
                expected: TableDims::new(1, 3, 3),
                found: TableDims::new(2, 3, 3),
            }
        );
    }

    #[test]
    fn corrupted_cell_is_reported() {
        let (a, b) = (b"ab", b"ab");
        let mut table = build(a, b, b"");
        table.set(0, 2, 2, Some(5));
        let err = reconstruct(a, b, b"", &table).unwrap_err();
        assert_eq!(
            err,
            ClcsError::InconsistentTable {
                level: 0,
                row: 2,
                col: 2
            }
        );
    }
}
