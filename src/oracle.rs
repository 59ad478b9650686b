//! Feasibility oracle.
//!
//! Checks a candidate against the three subsequence constraints from
//! scratch, without looking at any table. Tests use it to falsify the
//! builder and backtracker, so nothing here may share code with them.

/// Longest input [`exhaustive_optimum`] accepts for the shorter sequence.
pub const EXHAUSTIVE_LIMIT: usize = 20;

/// Returns true if `pattern` is a subsequence of `text`.
///
/// Two-pointer scan: the text pointer always advances, the pattern pointer
/// advances on a match. Linear in `text.len()`, no allocation.
pub fn is_subsequence<T: PartialEq>(pattern: &[T], text: &[T]) -> bool {
    let mut p = 0;
    let mut t = 0;
    while p < pattern.len() && t < text.len() {
        if pattern[p] == text[t] {
            p += 1;
        }
        t += 1;
    }
    p == pattern.len()
}

/// Returns true if `candidate` is a subsequence of both `a` and `b` and
/// contains `c` as a subsequence.
pub fn is_feasible<T: PartialEq>(a: &[T], b: &[T], c: &[T], candidate: &[T]) -> bool {
    is_subsequence(candidate, a) && is_subsequence(candidate, b) && is_subsequence(c, candidate)
}

/// Brute-force CLCS length: the longest feasible subsequence of the shorter
/// of `a` and `b`, or `None` if no subsequence is feasible.
///
/// Exponential in the shorter length; meant as a reference for small inputs.
///
/// # Panics
/// Panics if both `a` and `b` are longer than [`EXHAUSTIVE_LIMIT`].
pub fn exhaustive_optimum<T: Clone + PartialEq>(a: &[T], b: &[T], c: &[T]) -> Option<usize> {
    let short = if a.len() <= b.len() { a } else { b };
    assert!(
        short.len() <= EXHAUSTIVE_LIMIT,
        "exhaustive search limited to {EXHAUSTIVE_LIMIT} symbols, got {}",
        short.len()
    );

    let mut best: Option<usize> = None;
    let mut candidate = Vec::with_capacity(short.len());
    for mask in 0u32..(1u32 << short.len()) {
        let len = mask.count_ones() as usize;
        if best.is_some_and(|b| len <= b) || len < c.len() {
            continue;
        }
        candidate.clear();
        candidate.extend(
            short
                .iter()
                .enumerate()
                .filter(|(idx, _)| mask & (1 << idx) != 0)
                .map(|(_, sym)| sym.clone()),
        );
        if is_feasible(a, b, c, &candidate) {
            best = Some(len);
        }
    }
    best
}
