//! Runtime stacks kept for diagnostics.
//!
//! - [`CallStack`]: user function calls, with a depth limit; captured into an
//!   [`EvalBacktrace`] when an error crosses a function boundary.
//! - [`ExecStack`]: statements currently executing, one frame per statement
//!   (nested through blocks, loops and calls); rendered for breakpoint traces.

use rook_ir::{Name, NodeId, Position, StringInterner};
use rook_value::errors::recursion_limit_exceeded;
use rook_value::{BacktraceFrame, EvalBacktrace, EvalError, ScopeId};

/// One active user function call.
#[derive(Clone, Debug)]
pub struct CallFrame {
    /// `None` for anonymous functions.
    pub name: Option<Name>,
    pub call_pos: Position,
}

#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, failing without pushing when the limit is reached.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(recursion_limit_exceeded(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Snapshot, most recent call first.
    pub fn capture(&self, interner: &StringInterner) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| BacktraceFrame {
                name: f.name.map_or_else(
                    || "<anonymous>".to_string(),
                    |n| interner.lookup(n).to_string(),
                ),
                location: (!f.call_pos.is_unknown()).then(|| f.call_pos.display(interner)),
            })
            .collect();
        EvalBacktrace::new(frames)
    }
}

/// A statement being executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecFrame {
    pub node: NodeId,
    pub label: &'static str,
    pub pos: Position,
    pub scope: ScopeId,
}

#[derive(Clone, Debug, Default)]
pub struct ExecStack {
    frames: Vec<ExecFrame>,
}

impl ExecStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: ExecFrame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<ExecFrame> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&ExecFrame> {
        self.frames.last()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Innermost frame first.
    pub fn frames(&self) -> impl Iterator<Item = &ExecFrame> {
        self.frames.iter().rev()
    }

    /// One line per frame, innermost first: `  0: main.rk:4 assign`.
    pub fn render(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        for (i, frame) in self.frames().enumerate() {
            out.push_str(&format!(
                "  {i}: {} {}\n",
                frame.pos.line_key(interner),
                frame.label
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn call_stack_enforces_limit() {
        let mut stack = CallStack::new(2);
        let frame = CallFrame {
            name: None,
            call_pos: Position::UNKNOWN,
        };
        assert!(stack.push(frame.clone()).is_ok());
        assert!(stack.push(frame.clone()).is_ok());
        let err = stack.push(frame);
        assert_eq!(
            err.map_err(|e| e.message()),
            Err("maximum call depth of 2 exceeded".to_string())
        );
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn capture_lists_recent_calls_first() {
        let interner = StringInterner::new();
        let file = interner.intern("m.rk");
        let mut stack = CallStack::new(10);
        stack
            .push(CallFrame {
                name: Some(interner.intern("outer")),
                call_pos: Position::new(file, 1, 1),
            })
            .ok();
        stack
            .push(CallFrame {
                name: None,
                call_pos: Position::new(file, 5, 3),
            })
            .ok();

        let backtrace = stack.capture(&interner);
        let names: Vec<&str> = backtrace.frames().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["<anonymous>", "outer"]);
        assert_eq!(backtrace.frames()[0].location.as_deref(), Some("m.rk:5:3"));
    }

    #[test]
    fn exec_stack_renders_innermost_first() {
        let interner = StringInterner::new();
        let file = interner.intern("m.rk");
        let mut stack = ExecStack::new();
        stack.push(ExecFrame {
            node: NodeId::new(0),
            label: "for",
            pos: Position::new(file, 2, 1),
            scope: ScopeId::new(0),
        });
        stack.push(ExecFrame {
            node: NodeId::new(1),
            label: "assign",
            pos: Position::new(file, 3, 5),
            scope: ScopeId::new(1),
        });

        assert_eq!(stack.render(&interner), "  0: m.rk:3 assign\n  1: m.rk:2 for\n");
        assert_eq!(stack.pop().map(|f| f.label), Some("assign"));
        assert_eq!(stack.top().map(|f| f.label), Some("for"));
    }
}
