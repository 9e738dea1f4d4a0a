//! Control flow helpers (if/else, loop bodies, switch).

use rook_ir::{NodeId, SwitchCase};
use rook_value::{ControlAction, EvalResult, Value};

/// What a loop does after one evaluation of its body.
#[derive(Debug)]
pub enum LoopAction {
    /// The body finished normally with this value.
    Next(Value),
    /// `continue`: go to the next iteration.
    Continue,
    /// `break`: leave the loop.
    Break,
    /// Return or error: leave the loop and propagate.
    Exit(ControlAction),
}

/// Classify a body result. `break` and `continue` stop here; everything else
/// keeps travelling outward.
pub fn to_loop_action(result: EvalResult) -> LoopAction {
    match result {
        Ok(value) => LoopAction::Next(value),
        Err(ControlAction::Continue) => LoopAction::Continue,
        Err(ControlAction::Break) => LoopAction::Break,
        Err(action) => LoopAction::Exit(action),
    }
}

/// Evaluate an if/else. A missing alternative yields nil.
pub fn eval_if<F>(
    condition: NodeId,
    consequence: NodeId,
    alternative: Option<NodeId>,
    mut eval_fn: F,
) -> EvalResult
where
    F: FnMut(NodeId) -> EvalResult,
{
    if eval_fn(condition)?.is_truthy() {
        eval_fn(consequence)
    } else if let Some(alternative) = alternative {
        eval_fn(alternative)
    } else {
        Ok(Value::Nil)
    }
}

/// Pick the case to run for `subject`.
///
/// Candidates are evaluated case by case, left to right, stopping at the
/// first equal one. Without a match the first default case is chosen.
pub fn select_case<'c, F>(
    subject: &Value,
    cases: &'c [SwitchCase],
    mut eval_fn: F,
) -> Result<Option<&'c SwitchCase>, ControlAction>
where
    F: FnMut(NodeId) -> EvalResult,
{
    for case in cases.iter().filter(|c| !c.is_default) {
        for &expr in &case.exprs {
            if eval_fn(expr)? == *subject {
                return Ok(Some(case));
            }
        }
    }
    Ok(cases.iter().find(|c| c.is_default))
}
