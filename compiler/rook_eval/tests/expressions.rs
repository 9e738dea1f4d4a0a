//! Operators, access expressions, literals and name resolution.

mod common;

use common::{int, ints, script, text};
use rook_eval::{Builtin, Value};
use rook_ir::{BinaryOp, PrefixOp};

mod logical_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn and_or_short_circuit() {
        let build = |op: BinaryOp, left: bool| {
            script(move |b| {
                let left = b.bool(left);
                let msg = b.str("evaluated");
                let fail = b.call_named("error", vec![msg]);
                vec![b.infix(left, op, fail)]
            })
        };
        assert_eq!(build(BinaryOp::And, false).run(), Ok(Value::Bool(false)));
        assert_eq!(build(BinaryOp::Or, true).run(), Ok(Value::Bool(true)));
        assert_eq!(build(BinaryOp::And, true).error_message(), "evaluated");
    }

    #[test]
    fn logical_results_are_bools() {
        let s = script(|b| {
            let one = b.int(1);
            let a = b.str("a");
            let and = b.infix(one, BinaryOp::And, a);
            let nil = b.nil();
            let zero = b.int(0);
            let or = b.infix(nil, BinaryOp::Or, zero);
            vec![b.list(vec![and, or])]
        });
        assert_eq!(
            s.run(),
            Ok(Value::list(vec![Value::Bool(true), Value::Bool(false)]))
        );
    }

    #[test]
    fn ternary_and_not() {
        let s = script(|b| {
            let f = b.bool(false);
            let cond = b.prefix(PrefixOp::Not, f);
            let yes = b.str("yes");
            let no = b.str("no");
            vec![b.ternary(cond, yes, no)]
        });
        assert_eq!(s.run(), Ok(text("yes")));
    }
}

mod arithmetic_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn division_by_zero_has_position() {
        let s = script(|b| {
            b.at(7);
            let one = b.int(1);
            let zero = b.int(0);
            vec![b.infix(one, BinaryOp::Div, zero)]
        });
        let err = s.run().map_err(|e| (e.message(), e.position.map(|p| p.line)));
        assert_eq!(err, Err(("division by zero".to_string(), Some(7))));
    }

    #[test]
    fn mixed_arithmetic_promotes() {
        let s = script(|b| {
            let one = b.int(1);
            let half = b.float(0.5);
            vec![b.infix(one, BinaryOp::Add, half)]
        });
        assert_eq!(s.run(), Ok(Value::Float(1.5)));
    }

    #[test]
    fn negation() {
        let s = script(|b| {
            let five = b.int(5);
            vec![b.prefix(PrefixOp::Neg, five)]
        });
        assert_eq!(s.run(), Ok(int(-5)));
    }
}

mod access_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn negative_index_counts_from_end() {
        let s = script(|b| {
            let items = [1, 2, 3].map(|n| b.int(n)).to_vec();
            let list = b.list(items);
            let last = b.int(-1);
            vec![b.index(list, last)]
        });
        assert_eq!(s.run(), Ok(int(3)));
    }

    #[test]
    fn missing_map_key_is_nil() {
        let s = script(|b| {
            let key = b.str("a");
            let one = b.int(1);
            let map = b.map(vec![(key, one)]);
            let missing = b.str("b");
            vec![b.index(map, missing)]
        });
        assert_eq!(s.run(), Ok(Value::Nil));
    }

    #[test]
    fn slices() {
        // [1, 2, 3, 4][1:3], "hello"[:-1]
        let s = script(|b| {
            let items = [1, 2, 3, 4].map(|n| b.int(n)).to_vec();
            let list = b.list(items);
            let low = b.int(1);
            let high = b.int(3);
            let middle = b.slice(list, Some(low), Some(high));
            let hello = b.str("hello");
            let minus_one = b.int(-1);
            let init = b.slice(hello, None, Some(minus_one));
            vec![b.list(vec![middle, init])]
        });
        assert_eq!(
            s.run(),
            Ok(Value::list(vec![ints(&[2, 3]), text("hell")]))
        );
    }

    #[test]
    fn slice_bound_must_be_int() {
        let s = script(|b| {
            let list = b.list(vec![]);
            let low = b.str("x");
            vec![b.slice(list, Some(low), None)]
        });
        assert_eq!(s.error_message(), "type mismatch: expected int, got string");
    }

    #[test]
    fn membership() {
        let s = script(|b| {
            let two = b.int(2);
            let one = b.int(1);
            let two_again = b.int(2);
            let list = b.list(vec![one, two_again]);
            let in_list = b.contains(two, list);
            let a = b.str("a");
            let key = b.str("a");
            let value = b.int(1);
            let map = b.map(vec![(key, value)]);
            let in_map = b.contains(a, map);
            let ell = b.str("ell");
            let hello = b.str("hello");
            let in_str = b.contains(ell, hello);
            vec![b.list(vec![in_list, in_map, in_str])]
        });
        assert_eq!(s.run(), Ok(Value::list(vec![Value::Bool(true); 3])));
    }

    #[test]
    fn missing_attribute() {
        let s = script(|b| {
            let key = b.str("a");
            let one = b.int(1);
            let map = b.map(vec![(key, one)]);
            vec![b.get_attr(map, "b")]
        });
        assert_eq!(s.error_message(), "map has no attribute b");
    }
}

mod literal_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_deduplicates() {
        let s = script(|b| {
            let items = [1, 2, 2].map(|n| b.int(n)).to_vec();
            let set = b.set(items);
            vec![b.call_named("len", vec![set])]
        });
        assert_eq!(s.run(), Ok(int(2)));
    }

    #[test]
    fn map_keys_must_be_strings() {
        let s = script(|b| {
            let key = b.int(1);
            let value = b.int(2);
            vec![b.map(vec![(key, value)])]
        });
        assert_eq!(s.error_message(), "map keys must be strings, got int");
    }

    #[test]
    fn type_builtin_names_values() {
        let s = script(|b| {
            let x = b.float(1.5);
            vec![b.call_named("type", vec![x])]
        });
        assert_eq!(s.run(), Ok(text("float")));
    }
}

mod builtin_resolution_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn double() -> Builtin {
        Builtin::in_module("math", "double", |_, args| match args.as_slice() {
            [Value::Int(n)] => Ok(Value::Int(n * 2)),
            _ => Ok(Value::Nil),
        })
    }

    #[test]
    fn qualified_builtin_call() {
        // math.double(4)
        let s = script(|b| {
            let math = b.ident("math");
            let four = b.int(4);
            vec![b.object_call(math, "double", vec![four])]
        });
        let result = s.builder().builtin(double()).build().run(s.program);
        assert_eq!(result, Ok(int(8)));
    }

    #[test]
    fn declared_name_hides_builtin_module() {
        // math := {"double": 1}; math.double
        let s = script(|b| {
            let key = b.str("double");
            let one = b.int(1);
            let map = b.map(vec![(key, one)]);
            let decl = b.var("math", map);
            let math = b.ident("math");
            let attr = b.get_attr(math, "double");
            vec![decl, attr]
        });
        let result = s.builder().builtin(double()).build().run(s.program);
        assert_eq!(result, Ok(int(1)));
    }

    #[test]
    fn scope_binding_wins_over_builtin() {
        // len := 5; len
        let s = script(|b| {
            let five = b.int(5);
            let decl = b.var("len", five);
            let len = b.ident("len");
            vec![decl, len]
        });
        assert_eq!(s.run(), Ok(int(5)));
    }

    #[test]
    fn builtin_metadata_attributes() {
        let s = script(|b| {
            let len = b.ident("len");
            vec![b.get_attr(len, "__name__")]
        });
        assert_eq!(s.run(), Ok(text("len")));
    }

    #[test]
    fn without_default_builtins_names_are_undefined() {
        let s = script(|b| {
            let one = b.int(1);
            vec![b.call_named("print", vec![one])]
        });
        let result = s
            .builder()
            .default_builtins(false)
            .build()
            .run(s.program)
            .map_err(|e| e.message());
        assert_eq!(result, Err("undefined variable: print".to_string()));
    }
}
