//! Line breakpoints and the debugger hook they drive.
//!
//! Breakpoints are keyed on `file:line`. When a statement at a matching
//! position is about to execute, the interpreter builds a [`BreakpointHit`]
//! and hands it to the installed [`Debugger`]. Whether a hit blocks is up to
//! the debugger: the default [`LogDebugger`] never does, the
//! [`ConsoleDebugger`] waits for a line on its input when the breakpoint
//! asks to stop.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::io::{BufRead, BufReader};
use std::sync::Arc;

use crate::print_handler::{stderr_handler, SharedPrintHandler};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breakpoint {
    pub file: String,
    pub line: u32,
    pub disabled: bool,
    /// Include the execution stack in the hit.
    pub trace: bool,
    /// Ask the debugger to pause and show locals.
    pub stop: bool,
}

impl Breakpoint {
    /// An enabled breakpoint that neither traces nor stops.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Breakpoint {
            file: file.into(),
            line,
            disabled: false,
            trace: false,
            stop: false,
        }
    }

    #[must_use]
    pub fn with_trace(mut self) -> Self {
        self.trace = true;
        self
    }

    #[must_use]
    pub fn with_stop(mut self) -> Self {
        self.stop = true;
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// `file:line`
    pub fn key(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

/// Breakpoints by `file:line`.
#[derive(Clone, Debug, Default)]
pub struct BreakpointTable {
    by_location: FxHashMap<String, Breakpoint>,
}

impl BreakpointTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the breakpoint at its location.
    pub fn insert(&mut self, breakpoint: Breakpoint) {
        self.by_location.insert(breakpoint.key(), breakpoint);
    }

    pub fn remove(&mut self, key: &str) -> Option<Breakpoint> {
        self.by_location.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Breakpoint> {
        self.by_location.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_location.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_location.is_empty()
    }
}

impl FromIterator<Breakpoint> for BreakpointTable {
    fn from_iter<I: IntoIterator<Item = Breakpoint>>(iter: I) -> Self {
        let mut table = BreakpointTable::new();
        for breakpoint in iter {
            table.insert(breakpoint);
        }
        table
    }
}

/// What the debugger is told about a hit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakpointHit {
    /// `file:line`
    pub location: String,
    /// Rendered execution stack, when the breakpoint traces.
    pub trace: Option<String>,
    /// `(name, inspected value)` for the statement's scope, when it stops.
    pub locals: Option<Vec<(String, String)>>,
    pub stop: bool,
}

/// Receives breakpoint hits.
pub trait Debugger {
    fn on_hit(&mut self, hit: &BreakpointHit);
}

/// Logs hits through `tracing`. Never blocks.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDebugger;

impl Debugger for LogDebugger {
    fn on_hit(&mut self, hit: &BreakpointHit) {
        tracing::info!(location = %hit.location, "breakpoint");
        if let Some(trace) = &hit.trace {
            tracing::info!(location = %hit.location, "execution stack:\n{trace}");
        }
        if hit.stop {
            tracing::warn!(
                location = %hit.location,
                "breakpoint requests a stop but no interactive debugger is attached"
            );
        }
    }
}

/// Keeps every hit; clones share the record.
#[derive(Clone, Debug, Default)]
pub struct RecordingDebugger {
    hits: Arc<Mutex<Vec<BreakpointHit>>>,
}

impl RecordingDebugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hits(&self) -> Vec<BreakpointHit> {
        self.hits.lock().clone()
    }
}

impl Debugger for RecordingDebugger {
    fn on_hit(&mut self, hit: &BreakpointHit) {
        self.hits.lock().push(hit.clone());
    }
}

/// Interactive debugger: reports hits on an output handler and, for
/// stopping breakpoints, waits for a line on its input before resuming.
pub struct ConsoleDebugger {
    out: SharedPrintHandler,
    input: Box<dyn BufRead + Send>,
}

impl ConsoleDebugger {
    /// Report on stderr, read from stdin.
    pub fn new() -> Self {
        Self::with_io(stderr_handler(), BufReader::new(std::io::stdin()))
    }

    pub fn with_io(out: SharedPrintHandler, input: impl BufRead + Send + 'static) -> Self {
        ConsoleDebugger {
            out,
            input: Box::new(input),
        }
    }
}

impl Default for ConsoleDebugger {
    fn default() -> Self {
        Self::new()
    }
}

impl Debugger for ConsoleDebugger {
    fn on_hit(&mut self, hit: &BreakpointHit) {
        self.out.println(&format!("breakpoint at {}", hit.location));
        if let Some(trace) = &hit.trace {
            self.out.println(trace.trim_end());
        }
        if !hit.stop {
            return;
        }
        for (name, value) in hit.locals.iter().flatten() {
            self.out.println(&format!("  {name} = {value}"));
        }
        self.out.println("paused; press enter to continue");
        let mut line = String::new();
        if let Err(err) = self.input.read_line(&mut line) {
            tracing::warn!(%err, "debugger input unavailable; resuming");
        }
    }
}
