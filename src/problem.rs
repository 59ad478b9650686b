//! A single CLCS instance.

use crate::oracle;
use crate::table::TableDims;

/// Borrowed inputs of one CLCS query: sequences `a` and `b` and the
/// constraint `c` every solution must contain.
#[derive(Debug)]
pub struct ClcsProblem<'a, T> {
    pub a: &'a [T],
    pub b: &'a [T],
    pub c: &'a [T],
}

// Manual impls: the derives would demand `T: Clone`/`T: Copy`.
impl<T> Clone for ClcsProblem<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ClcsProblem<'_, T> {}

impl<'a, T> ClcsProblem<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T], c: &'a [T]) -> Self {
        Self { a, b, c }
    }

    /// Shape of the table this instance needs.
    pub fn dims(&self) -> TableDims {
        TableDims::of(self.a, self.b, self.c)
    }
}

impl<T: PartialEq> ClcsProblem<'_, T> {
    /// Check `candidate` against this instance with the feasibility oracle.
    pub fn is_feasible(&self, candidate: &[T]) -> bool {
        oracle::is_feasible(self.a, self.b, self.c, candidate)
    }
}
