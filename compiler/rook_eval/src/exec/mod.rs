//! Evaluation helpers the `Interpreter` delegates to.
//!
//! - `control`: loop signals, if/else, switch case selection
//! - `pipe`: pipe stage shapes and argument threading
//! - `template`: string template assembly
//!
//! Helpers take closures for sub-evaluation so they stay independent of the
//! interpreter's borrow of the node arena.

pub mod control;
pub mod pipe;
pub mod template;
