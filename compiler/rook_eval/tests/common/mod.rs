//! Shared helpers for the evaluator integration tests.
//!
//! Each test builds a program with [`script`], then runs it through one of
//! the [`Script`] helpers. Output from `print` is captured, never written to
//! stdout.

#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

use rook_eval::{
    buffer_handler, silent_handler, EvalError, Interpreter, InterpreterBuilder, Value,
};
use rook_ir::{NodeArena, NodeId, StringInterner, TreeBuilder};

pub const FILE: &str = "main.rk";

/// A built program together with the interner and arena it lives in.
pub struct Script {
    pub interner: StringInterner,
    pub arena: NodeArena,
    pub program: NodeId,
}

/// Build a program from the statements `build` returns.
pub fn script(build: impl FnOnce(&mut TreeBuilder<'_>) -> Vec<NodeId>) -> Script {
    let interner = StringInterner::new();
    let (arena, program) = {
        let mut b = TreeBuilder::new(&interner, FILE);
        let statements = build(&mut b);
        let program = b.program(statements);
        (b.finish(), program)
    };
    Script {
        interner,
        arena,
        program,
    }
}

impl Script {
    /// A builder with `print` silenced; tests add what they need.
    pub fn builder(&self) -> InterpreterBuilder<'_> {
        InterpreterBuilder::new(&self.interner, &self.arena).print_handler(silent_handler())
    }

    pub fn interpreter(&self) -> Interpreter<'_> {
        self.builder().build()
    }

    pub fn run(&self) -> Result<Value, EvalError> {
        self.interpreter().run(self.program)
    }

    /// Run and also return everything `print` wrote.
    pub fn run_printing(&self) -> (Result<Value, EvalError>, String) {
        let out = buffer_handler();
        let result = self
            .builder()
            .print_handler(out.clone())
            .build()
            .run(self.program);
        (result, out.output())
    }

    /// Message of the error the program must fail with.
    pub fn error_message(&self) -> String {
        match self.run() {
            Ok(value) => panic!("expected an error, got {value}"),
            Err(err) => err.message(),
        }
    }
}

pub fn int(n: i64) -> Value {
    Value::Int(n)
}

pub fn text(s: &str) -> Value {
    Value::string(s)
}

pub fn ints(items: &[i64]) -> Value {
    Value::list(items.iter().copied().map(Value::Int).collect())
}
