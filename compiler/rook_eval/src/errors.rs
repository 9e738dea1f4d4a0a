//! Error constructors for the evaluator.
//!
//! A single import point for the factories defined next to [`EvalError`] in
//! `rook_value`, so evaluator code and embedders need only one path.
//!
//! ```ignore
//! use rook_eval::errors::{undefined_variable, division_by_zero};
//! ```

pub use rook_value::{ControlAction, EvalBacktrace, EvalError, EvalErrorKind, EvalResult};

// Names and bindings

pub use rook_value::errors::{
    cancelled, constant_assignment, constant_redeclared, undeclared_assignment, undefined_variable,
};

// Loops, pipes and control flow

pub use rook_value::errors::{
    control_outside_loop, invalid_for_binding, invalid_pipe, not_a_container, not_iterable,
    pipe_type_mismatch,
};

// Calls

pub use rook_value::errors::{not_callable, recursion_limit_exceeded, wrong_arg_count};

// Operators and values

pub use rook_value::errors::{
    binary_type_mismatch, cannot_index, division_by_zero, index_out_of_bounds, integer_overflow,
    invalid_prefix_op, map_key_not_string, no_such_attribute, type_mismatch, unhashable,
    unpack_mismatch,
};

// Imports

pub use rook_value::errors::{import_failed, imports_disabled};
