//! Pipe expressions.

use rook_ir::NodeId;
use rook_value::errors::{invalid_pipe, pipe_type_mismatch};
use rook_value::{EvalResult, ScopeId};

use super::Interpreter;
use crate::exec::pipe::{bare_args, prepend_arg, PipeStage};

impl Interpreter<'_> {
    /// `source |> stage |> ...`: each stage receives the previous result as
    /// its first argument. The first error aborts the pipe.
    pub(crate) fn eval_pipe(&mut self, stages: &[NodeId], scope: ScopeId) -> EvalResult {
        let [source, rest @ ..] = stages else {
            return Err(invalid_pipe(0).into());
        };
        if rest.is_empty() {
            return Err(invalid_pipe(1).into());
        }

        let arena = self.arena;
        let mut current = self.evaluate(*source, scope)?;
        for (i, &stage) in rest.iter().enumerate() {
            let pos = arena.pos(stage);
            current = match PipeStage::classify(stage, arena.kind(stage)) {
                PipeStage::Call { callee, args } => {
                    let func = self.evaluate(callee, scope)?;
                    let args = self.eval_args(args, scope)?;
                    self.apply_function(&func, prepend_arg(current, args), pos)
                }
                PipeStage::MethodCall {
                    object,
                    method,
                    args,
                } => self.eval_method_call(stage, object, method, args, Some(current), scope),
                PipeStage::Bare(expr) => {
                    let value = self.evaluate(expr, scope)?;
                    if value.is_callable() {
                        self.apply_function(&value, bare_args(current), pos)
                    } else if i == 0 {
                        Ok(value)
                    } else {
                        Err(pipe_type_mismatch(value.type_name()).into())
                    }
                }
            }
            .map_err(|action| action.or_position(pos))?;
        }
        Ok(current)
    }
}
