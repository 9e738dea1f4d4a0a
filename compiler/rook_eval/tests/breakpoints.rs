//! Breakpoints reported to a debugger as statements execute.

mod common;

use std::io::Cursor;

use common::{script, Script, FILE};
use pretty_assertions::assert_eq;
use rook_eval::{buffer_handler, Breakpoint, BreakpointHit, ConsoleDebugger, RecordingDebugger};
use rook_ir::BinaryOp;

/// ```text
/// 1: x := 1
/// 2: y := x + 1
/// 3: for i := range [1, 2] {
/// 4:     z := i
///    }
/// ```
fn sample() -> Script {
    script(|b| {
        b.at(1);
        let one = b.int(1);
        let x = b.var("x", one);

        b.at(2);
        let x_ref = b.ident("x");
        let one = b.int(1);
        let sum = b.infix(x_ref, BinaryOp::Add, one);
        let y = b.var("y", sum);

        b.at(4);
        let i = b.ident("i");
        let z = b.var("z", i);
        let body = b.block(vec![z]);

        b.at(3);
        let one = b.int(1);
        let two = b.int(2);
        let list = b.list(vec![one, two]);
        let iterable = b.range(list);
        let for_loop = b.for_each(&["i"], iterable, body);
        vec![x, y, for_loop]
    })
}

fn run_with(s: &Script, breakpoints: Vec<Breakpoint>) -> Vec<BreakpointHit> {
    let debugger = RecordingDebugger::new();
    let result = s
        .builder()
        .breakpoints(breakpoints)
        .debugger(debugger.clone())
        .build()
        .run(s.program);
    assert!(result.is_ok(), "{result:?}");
    debugger.hits()
}

#[test]
fn plain_breakpoint_reports_location_once_per_execution() {
    let s = sample();
    let hits = run_with(&s, vec![Breakpoint::new(FILE, 4)]);
    let expected = BreakpointHit {
        location: format!("{FILE}:4"),
        trace: None,
        locals: None,
        stop: false,
    };
    assert_eq!(hits, vec![expected.clone(), expected]);
}

#[test]
fn trace_renders_execution_stack() {
    let s = sample();
    let hits = run_with(&s, vec![Breakpoint::new(FILE, 4).with_trace()]);
    assert_eq!(hits.len(), 2);
    assert_eq!(
        hits[0].trace.as_deref(),
        Some(format!("  0: {FILE}:4 var\n  1: {FILE}:3 for\n").as_str())
    );
}

#[test]
fn stop_reports_locals_before_the_statement_runs() {
    let s = sample();
    let hits = run_with(&s, vec![Breakpoint::new(FILE, 2).with_stop()]);
    assert_eq!(
        hits,
        vec![BreakpointHit {
            location: format!("{FILE}:2"),
            trace: None,
            locals: Some(vec![("x".to_string(), "1".to_string())]),
            stop: true,
        }]
    );
}

#[test]
fn loop_body_locals_are_the_iteration_scope() {
    let s = sample();
    let hits = run_with(&s, vec![Breakpoint::new(FILE, 4).with_stop()]);
    let locals: Vec<_> = hits.into_iter().map(|h| h.locals).collect();
    assert_eq!(
        locals,
        vec![
            Some(vec![("i".to_string(), "0".to_string())]),
            Some(vec![("i".to_string(), "1".to_string())]),
        ]
    );
}

#[test]
fn disabled_and_other_file_breakpoints_do_not_fire() {
    let s = sample();
    let hits = run_with(
        &s,
        vec![Breakpoint::new(FILE, 1).disabled(), Breakpoint::new("other.rk", 2)],
    );
    assert_eq!(hits, vec![]);
}

#[test]
fn later_breakpoint_replaces_earlier_on_same_line() {
    let s = sample();
    let hits = run_with(
        &s,
        vec![Breakpoint::new(FILE, 1), Breakpoint::new(FILE, 1).disabled()],
    );
    assert!(hits.is_empty());
}

#[test]
fn default_debugger_does_not_block_on_stop() {
    let s = sample();
    let result = s
        .builder()
        .breakpoints([Breakpoint::new(FILE, 2).with_stop()])
        .build()
        .run(s.program);
    assert!(result.is_ok());
}

#[test]
fn console_debugger_resumes_after_input() {
    let s = sample();
    let out = buffer_handler();
    let debugger = ConsoleDebugger::with_io(out.clone(), Cursor::new(b"\n".to_vec()));
    let result = s
        .builder()
        .breakpoints([Breakpoint::new(FILE, 2).with_stop()])
        .debugger(debugger)
        .build()
        .run(s.program);
    assert!(result.is_ok());
    assert!(out.output().starts_with(&format!("breakpoint at {FILE}:2\n")));
}
