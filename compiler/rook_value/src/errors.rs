//! Runtime errors and control signals.
//!
//! Evaluation returns [`EvalResult`]: `Ok(value)` for normal completion, or
//! `Err(ControlAction)` for anything that unwinds. Errors, `break`,
//! `continue` and `return` all travel the same channel, so a loop or
//! function boundary intercepts exactly the signals it handles and every
//! other signal keeps propagating untouched.
//!
//! Factory functions (`division_by_zero()`, `undefined_variable(..)`) are the
//! way to build errors; they are `#[cold]` so the happy path stays tight.

use crate::Value;
use rook_ir::{Position, StringInterner};
use std::fmt;

/// Result of evaluating a node.
pub type EvalResult = Result<Value, ControlAction>;

/// Typed error category.
///
/// The `Display` impl is the user-facing message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("evaluation cancelled")]
    Cancelled,

    // Names and bindings
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },
    #[error("cannot redeclare constant: {name}")]
    ConstantRedeclared { name: String },
    #[error("cannot assign to constant: {name}")]
    ConstantAssignment { name: String },
    #[error("cannot assign to undeclared variable: {name}")]
    UndeclaredAssignment { name: String },

    // Loops, pipes, control
    #[error("cannot iterate over {type_name}")]
    NotIterable { type_name: String },
    #[error("{type_name} is not a container")]
    NotAContainer { type_name: String },
    #[error("for loop binds 1 or 2 names, got {count}")]
    InvalidForBinding { count: usize },
    #[error("pipe expression needs at least 2 stages, got {count}")]
    InvalidPipe { count: usize },
    #[error("unexpected {type_name} in pipe expression")]
    PipeTypeMismatch { type_name: String },
    #[error("{keyword} outside of a loop")]
    ControlOutsideLoop { keyword: &'static str },

    // Calls
    #[error("{type_name} is not callable")]
    NotCallable { type_name: String },
    #[error("{name}: expected {expected} arguments, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("maximum call depth of {depth} exceeded")]
    RecursionLimit { depth: usize },

    // Types and operators
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("unsupported operand types for {op}: {left} and {right}")]
    BinaryTypeMismatch {
        op: &'static str,
        left: String,
        right: String,
    },
    #[error("unsupported operand type for unary {op}: {type_name}")]
    InvalidPrefixOp {
        op: &'static str,
        type_name: String,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: String },

    // Access
    #[error("index {index} out of bounds")]
    IndexOutOfBounds { index: i64 },
    #[error("cannot index {receiver} with {index}")]
    CannotIndex { receiver: String, index: String },
    #[error("{type_name} has no attribute {attr}")]
    NoSuchAttribute { type_name: String, attr: String },
    #[error("map keys must be strings, got {type_name}")]
    MapKeyNotString { type_name: String },
    #[error("{type_name} values cannot be stored in a set")]
    Unhashable { type_name: String },
    #[error("cannot unpack {got} values into {expected} names")]
    UnpackMismatch { expected: usize, got: usize },

    // Imports
    #[error("imports are disabled: cannot import {module}")]
    ImportsDisabled { module: String },
    #[error("failed to import {module}: {reason}")]
    ImportFailed { module: String, reason: String },

    #[error("{message}")]
    Custom { message: String },
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function name, `<anonymous>` for unnamed literals.
    pub name: String,
    /// Rendered call site, `file:line:column`.
    pub location: Option<String>,
}

/// Snapshot of the call stack at an error site, innermost call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(location) = &frame.location {
                write!(f, " at {location}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Innermost node being evaluated when the error was raised.
    pub position: Option<Position>,
    /// User function calls active when the error was raised.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    /// An error with a free-form message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            position: None,
            backtrace: None,
        }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach `position` unless an inner node already did.
    #[must_use]
    pub fn or_position(mut self, position: Position) -> Self {
        if self.position.is_none() && !position.is_unknown() {
            self.position = Some(position);
        }
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == EvalErrorKind::Cancelled
    }

    /// `message at file:line:column`, followed by the backtrace if any.
    pub fn render(&self, interner: &StringInterner) -> String {
        let mut out = self.message();
        if let Some(position) = self.position {
            out.push_str(" at ");
            out.push_str(&position.display(interner));
        }
        if let Some(backtrace) = self.backtrace.as_ref().filter(|b| !b.is_empty()) {
            out.push('\n');
            out.push_str(&backtrace.to_string());
        }
        out
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for EvalError {}

/// Non-local exit from a node.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlAction {
    Error(EvalError),
    Break,
    Continue,
    Return(Value),
}

impl ControlAction {
    /// Attach `position` to an error that has none yet; other signals pass through.
    #[must_use]
    pub fn or_position(self, position: Position) -> Self {
        match self {
            ControlAction::Error(e) => ControlAction::Error(e.or_position(position)),
            other => other,
        }
    }

    pub fn into_error(self) -> Option<EvalError> {
        match self {
            ControlAction::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&EvalError> {
        match self {
            ControlAction::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EvalError> for ControlAction {
    fn from(e: EvalError) -> Self {
        ControlAction::Error(e)
    }
}

// Names and bindings

#[cold]
pub fn cancelled() -> EvalError {
    EvalError::from_kind(EvalErrorKind::Cancelled)
}

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn constant_redeclared(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstantRedeclared {
        name: name.to_string(),
    })
}

#[cold]
pub fn constant_assignment(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstantAssignment {
        name: name.to_string(),
    })
}

#[cold]
pub fn undeclared_assignment(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndeclaredAssignment {
        name: name.to_string(),
    })
}

// Loops, pipes, control

#[cold]
pub fn not_iterable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIterable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn not_a_container(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAContainer {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn invalid_for_binding(count: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidForBinding { count })
}

#[cold]
pub fn invalid_pipe(count: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidPipe { count })
}

#[cold]
pub fn pipe_type_mismatch(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::PipeTypeMismatch {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn control_outside_loop(keyword: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ControlOutsideLoop { keyword })
}

// Calls

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { depth })
}

// Types and operators

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn binary_type_mismatch(op: &'static str, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cold]
pub fn invalid_prefix_op(op: &'static str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidPrefixOp {
        op,
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

// Access

#[cold]
pub fn index_out_of_bounds(index: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index })
}

#[cold]
pub fn cannot_index(receiver: &str, index: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotIndex {
        receiver: receiver.to_string(),
        index: index.to_string(),
    })
}

#[cold]
pub fn no_such_attribute(type_name: &str, attr: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuchAttribute {
        type_name: type_name.to_string(),
        attr: attr.to_string(),
    })
}

#[cold]
pub fn map_key_not_string(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MapKeyNotString {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn unhashable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Unhashable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn unpack_mismatch(expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnpackMismatch { expected, got })
}

// Imports

#[cold]
pub fn imports_disabled(module: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImportsDisabled {
        module: module.to_string(),
    })
}

#[cold]
pub fn import_failed(module: &str, reason: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImportFailed {
        module: module.to_string(),
        reason: reason.to_string(),
    })
}
