//! `for` loops in all three forms: signals, scoping and error propagation.

#![allow(clippy::unwrap_used, reason = "tests can panic")]

mod common;

use common::{int, script, text};
use proptest::prelude::*;
use rook_eval::Value;
use rook_ir::{BinaryOp, NodeId, TreeBuilder};

/// `name = name + value`
fn add_to(b: &mut TreeBuilder<'_>, name: &str, value: NodeId) -> NodeId {
    let current = b.ident(name);
    let sum = b.infix(current, BinaryOp::Add, value);
    b.assign(name, sum)
}

/// `for i := 0; i < limit; i := i + 1 { body }`
fn counting_loop(b: &mut TreeBuilder<'_>, limit: i64, body: Vec<NodeId>) -> NodeId {
    let zero = b.int(0);
    let init = b.var("i", zero);
    let i = b.ident("i");
    let limit = b.int(limit);
    let cond = b.infix(i, BinaryOp::Lt, limit);
    let i = b.ident("i");
    let one = b.int(1);
    let next = b.infix(i, BinaryOp::Add, one);
    let post = b.var("i", next);
    let body = b.block(body);
    b.for_cond(Some(init), Some(cond), Some(post), body)
}

mod condition_loop_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sums_and_runs_body_once_per_iteration() {
        let s = script(|b| {
            let zero = b.int(0);
            let sum = b.var("sum", zero);
            let zero = b.int(0);
            let runs = b.var("runs", zero);
            let i = b.ident("i");
            let add_i = add_to(b, "sum", i);
            let one = b.int(1);
            let count = add_to(b, "runs", one);
            let for_loop = counting_loop(b, 3, vec![add_i, count]);
            let total = b.ident("sum");
            vec![sum, runs, for_loop, total]
        });
        let mut interp = s.interpreter();
        assert_eq!(interp.run(s.program), Ok(int(3)));
        assert_eq!(interp.global("runs"), Some(int(3)));
    }

    #[test]
    fn init_binding_does_not_leak() {
        let s = script(|b| {
            let for_loop = counting_loop(b, 2, vec![]);
            let i = b.ident("i");
            vec![for_loop, i]
        });
        assert_eq!(s.error_message(), "undefined variable: i");
    }

    #[test]
    fn missing_condition_runs_until_break() {
        let s = script(|b| {
            let zero = b.int(0);
            let n = b.var("n", zero);
            let one = b.int(1);
            let bump = add_to(b, "n", one);
            let current = b.ident("n");
            let five = b.int(5);
            let done = b.infix(current, BinaryOp::Eq, five);
            let brk = b.break_();
            let stop = b.block(vec![brk]);
            let check = b.if_(done, stop, None);
            let body = b.block(vec![bump, check]);
            let for_loop = b.for_cond(None, None, None, body);
            let n_ref = b.ident("n");
            vec![n, for_loop, n_ref]
        });
        assert_eq!(s.run(), Ok(int(5)));
    }

    proptest! {
        #[test]
        fn sum_matches_closed_form(limit in 0i64..40) {
            let s = script(|b| {
                let zero = b.int(0);
                let sum = b.var("sum", zero);
                let i = b.ident("i");
                let add_i = add_to(b, "sum", i);
                let for_loop = counting_loop(b, limit, vec![add_i]);
                let total = b.ident("sum");
                vec![sum, for_loop, total]
            });
            prop_assert_eq!(s.run(), Ok(int(limit * (limit - 1) / 2)));
        }
    }
}

mod signal_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn break_yields_last_completed_body_value() {
        // n := 0
        // for { n = n + 1; if n == 3 { break }; n * 10 }
        let s = script(|b| {
            let zero = b.int(0);
            let n = b.var("n", zero);
            let one = b.int(1);
            let bump = add_to(b, "n", one);
            let current = b.ident("n");
            let three = b.int(3);
            let done = b.infix(current, BinaryOp::Eq, three);
            let brk = b.break_();
            let stop = b.block(vec![brk]);
            let check = b.if_(done, stop, None);
            let current = b.ident("n");
            let ten = b.int(10);
            let scaled = b.infix(current, BinaryOp::Mul, ten);
            let body = b.block(vec![bump, check, scaled]);
            let for_loop = b.for_ever(body);
            vec![n, for_loop]
        });
        let mut interp = s.interpreter();
        assert_eq!(interp.run(s.program), Ok(int(20)));
        assert_eq!(interp.global("n"), Some(int(3)));
    }

    #[test]
    fn continue_skips_rest_of_body() {
        // for _, v := range [1, 2, 3, 4] { if v % 2 == 0 { continue }; total = total + v }
        let s = script(|b| {
            let zero = b.int(0);
            let total = b.var("total", zero);
            let items = [1, 2, 3, 4].map(|n| b.int(n)).to_vec();
            let list = b.list(items);
            let iterable = b.range(list);
            let v = b.ident("v");
            let two = b.int(2);
            let rem = b.infix(v, BinaryOp::Mod, two);
            let zero = b.int(0);
            let even = b.infix(rem, BinaryOp::Eq, zero);
            let cont = b.continue_();
            let skip = b.block(vec![cont]);
            let check = b.if_(even, skip, None);
            let v = b.ident("v");
            let add = add_to(b, "total", v);
            let body = b.block(vec![check, add]);
            let for_loop = b.for_each(&["i", "v"], iterable, body);
            let result = b.ident("total");
            vec![total, for_loop, result]
        });
        assert_eq!(s.run(), Ok(int(4)));
    }

    #[test]
    fn break_only_leaves_innermost_loop() {
        let s = script(|b| {
            let zero = b.int(0);
            let count = b.var("count", zero);
            let one = b.int(1);
            let bump = add_to(b, "count", one);
            let brk = b.break_();
            let inner_body = b.block(vec![bump, brk]);
            let inner = b.for_ever(inner_body);
            let outer = counting_loop(b, 3, vec![inner]);
            let result = b.ident("count");
            vec![count, outer, result]
        });
        assert_eq!(s.run(), Ok(int(3)));
    }

    #[test]
    fn return_passes_through_loop_to_function() {
        let s = script(|b| {
            let seven = b.int(7);
            let ret = b.return_(Some(seven));
            let body = b.block(vec![ret]);
            let for_loop = b.for_ever(body);
            let func_body = b.block(vec![for_loop]);
            let f = b.func(Some("f"), &[], func_body);
            let call = b.call_named("f", vec![]);
            vec![f, call]
        });
        assert_eq!(s.run(), Ok(int(7)));
    }

    #[test]
    fn errors_leave_loop_unchanged() {
        let failing = |b: &mut TreeBuilder<'_>| {
            let msg = b.str("boom");
            b.call_named("error", vec![msg])
        };
        let direct = script(|b| vec![failing(b)]);
        let in_loop = script(|b| {
            let call = failing(b);
            let body = b.block(vec![call]);
            vec![b.for_ever(body)]
        });
        let expected = direct.run().unwrap_err();
        let got = in_loop.run().unwrap_err();
        assert_eq!(expected.message(), "boom");
        assert_eq!(got.kind, expected.kind);
        assert_eq!(
            got.position.map(|p| (p.line, p.column)),
            expected.position.map(|p| (p.line, p.column))
        );
        assert_eq!(got.backtrace, None);
    }
}

mod iterator_loop_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_name_binds_list_index() {
        let s = script(|b| {
            let nil = b.nil();
            let last = b.var("last", nil);
            let x = b.str("x");
            let y = b.str("y");
            let list = b.list(vec![x, y]);
            let i = b.ident("i");
            let record = b.assign("last", i);
            let body = b.block(vec![record]);
            let iterable = b.range(list);
            let for_loop = b.for_each(&["i"], iterable, body);
            let result = b.ident("last");
            vec![last, for_loop, result]
        });
        assert_eq!(s.run(), Ok(int(1)));
    }

    #[test]
    fn map_binds_keys_and_values_in_key_order() {
        let s = script(|b| {
            let empty = b.str("");
            let out = b.var("out", empty);
            let kb = b.str("b");
            let two = b.int(2);
            let ka = b.str("a");
            let one = b.int(1);
            let map = b.map(vec![(kb, two), (ka, one)]);
            let iterable = b.range(map);
            let k = b.ident("k");
            let add_k = add_to(b, "out", k);
            let v = b.ident("v");
            let v_text = b.call_named("string", vec![v]);
            let add_v = add_to(b, "out", v_text);
            let body = b.block(vec![add_k, add_v]);
            let for_loop = b.for_each(&["k", "v"], iterable, body);
            let result = b.ident("out");
            vec![out, for_loop, result]
        });
        assert_eq!(s.run(), Ok(text("a1b2")));
    }

    #[test]
    fn body_scope_is_fresh_each_iteration() {
        // for i := range [1, 2] { if i == 0 { y := 5 } else { found = y } }
        let s = script(|b| {
            let nil = b.nil();
            let found = b.var("found", nil);
            let one = b.int(1);
            let two = b.int(2);
            let list = b.list(vec![one, two]);
            let i = b.ident("i");
            let zero = b.int(0);
            let first = b.infix(i, BinaryOp::Eq, zero);
            let five = b.int(5);
            let decl = b.var("y", five);
            let then = b.block(vec![decl]);
            let y = b.ident("y");
            let read = b.assign("found", y);
            let otherwise = b.block(vec![read]);
            let branch = b.if_(first, then, Some(otherwise));
            let body = b.block(vec![branch]);
            let iterable = b.range(list);
            let for_loop = b.for_each(&["i"], iterable, body);
            vec![found, for_loop]
        });
        assert_eq!(s.error_message(), "undefined variable: y");
    }

    #[test]
    fn loop_scopes_are_released() {
        let s = script(|b| {
            let items = [1, 2, 3].map(|n| b.int(n)).to_vec();
            let list = b.list(items);
            let v = b.ident("v");
            let decl = b.var("seen", v);
            let body = b.block(vec![decl]);
            let iterable = b.range(list);
            let for_loop = b.for_each(&["i", "v"], iterable, body);
            let inner = counting_loop(b, 2, vec![for_loop]);
            vec![inner]
        });
        let mut interp = s.interpreter();
        assert_eq!(interp.run(s.program), Ok(Value::Nil));
        assert_eq!(interp.env().live_scopes(), 1);
    }

    #[test]
    fn three_names_is_an_error() {
        let s = script(|b| {
            let list = b.list(vec![]);
            let body = b.block(vec![]);
            vec![b.for_each(&["a", "b", "c"], list, body)]
        });
        assert_eq!(s.error_message(), "for loop binds 1 or 2 names, got 3");
    }

    #[test]
    fn non_container_is_not_iterable() {
        let direct = script(|b| {
            let five = b.int(5);
            let body = b.block(vec![]);
            vec![b.for_each(&["x"], five, body)]
        });
        assert_eq!(direct.error_message(), "cannot iterate over int");

        let ranged = script(|b| {
            let five = b.int(5);
            let iterable = b.range(five);
            let body = b.block(vec![]);
            vec![b.for_each(&["x"], iterable, body)]
        });
        assert_eq!(ranged.error_message(), "cannot iterate over int");
    }

    #[test]
    fn container_without_range_is_not_iterable() {
        // for x := [1, 2] {}
        let s = script(|b| {
            let one = b.int(1);
            let two = b.int(2);
            let list = b.list(vec![one, two]);
            let body = b.block(vec![]);
            vec![b.for_each(&["x"], list, body)]
        });
        assert_eq!(s.error_message(), "cannot iterate over list");
    }
}
