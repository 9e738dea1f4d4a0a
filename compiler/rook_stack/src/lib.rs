//! Stack growth guard for the recursive evaluator.
//!
//! Evaluating a deeply nested tree (long `a + b + c + ...` chains, deep
//! recursion through user functions) recurses once per node. On native
//! targets the stack is grown on demand with `stacker`; on WASM the guard is
//! a passthrough.
//!
//! - **Red zone**: 128KB. Below this, a new segment is allocated.
//! - **Segment size**: 2MB per growth.
//!
//! A single evaluator frame (dispatch + statement tracking + call setup) is
//! larger than a parser frame, so both values sit above the usual
//! 100KB / 1MB pair.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn eval(&mut self, id: NodeId, scope: ScopeId) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_inner(id, scope))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Bytes of stack left before the guard would grow, if the platform reports it.
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
