use super::*;
use crate::errors::EvalErrorKind;

fn ints(values: &[i64]) -> Value {
    Value::list(values.iter().copied().map(Value::Int).collect())
}

mod truthiness {
    use super::*;

    #[test]
    fn zero_empty_and_nil_are_false() {
        for value in [
            Value::Nil,
            Value::Bool(false),
            Value::Int(0),
            Value::Float(0.0),
            Value::string(""),
            ints(&[]),
            Value::map_from(Vec::<(&str, Value)>::new()),
        ] {
            assert!(!value.is_truthy(), "{value} should be falsy");
        }
    }

    #[test]
    fn everything_else_is_true() {
        let builtin = Value::builtin(Builtin::noop("noop", None));
        for value in [Value::Int(-1), Value::string("x"), ints(&[0]), builtin] {
            assert!(value.is_truthy(), "{value} should be truthy");
        }
    }
}

mod display {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inspect_quotes_strings() {
        assert_eq!(Value::string("hi").inspect(), "\"hi\"");
        assert_eq!(Value::string("hi").to_text(), "hi");
        assert_eq!(
            Value::list(vec![Value::Int(1), Value::string("a"), Value::Nil]).inspect(),
            "[1, \"a\", nil]"
        );
    }

    #[test]
    fn floats_keep_a_fraction() {
        assert_eq!(Value::Float(3.0).inspect(), "3.0");
        assert_eq!(Value::Float(2.5).inspect(), "2.5");
    }

    #[test]
    fn maps_and_sets() {
        let map = Value::map_from([("b", Value::Int(2)), ("a", Value::Int(1))]);
        assert_eq!(map.inspect(), "{\"a\": 1, \"b\": 2}");

        let set = Value::set([HashKey::Int(2), HashKey::Int(1)].into_iter().collect());
        assert_eq!(set.inspect(), "{1, 2}");
    }

    #[test]
    fn callables() {
        let builtin = Value::builtin(Builtin::noop("get", Some("http")));
        assert_eq!(builtin.inspect(), "<builtin http.get>");
    }
}

mod equality {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn int_and_float_compare_numerically() {
        assert_eq!(Value::Int(2), Value::Float(2.0));
        assert_ne!(Value::Int(2), Value::Float(2.5));
    }

    #[test]
    fn builtins_compare_by_identity() {
        let a = Value::builtin(Builtin::noop("f", None));
        let b = Value::builtin(Builtin::noop("f", None));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn different_types_differ() {
        assert_ne!(Value::Int(1), Value::string("1"));
        assert_ne!(Value::Nil, Value::Bool(false));
    }
}

mod containers {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn negative_index_counts_from_end() {
        let list = ints(&[1, 2, 3]);
        assert_eq!(list.index(&Value::Int(-1)), Ok(Value::Int(3)));
        assert_eq!(list.index(&Value::Int(0)), Ok(Value::Int(1)));
        assert_eq!(
            list.index(&Value::Int(3)).map_err(|e| e.kind),
            Err(EvalErrorKind::IndexOutOfBounds { index: 3 })
        );
        assert_eq!(Value::string("abc").index(&Value::Int(-2)), Ok(Value::string("b")));
    }

    #[test]
    fn missing_map_key_is_nil() {
        let map = Value::map_from([("a", Value::Int(1))]);
        assert_eq!(map.index(&Value::string("a")), Ok(Value::Int(1)));
        assert_eq!(map.index(&Value::string("z")), Ok(Value::Nil));
        assert!(map.index(&Value::Int(0)).is_err());
    }

    #[test]
    fn slices_clamp() {
        let list = ints(&[1, 2, 3, 4]);
        assert_eq!(list.slice(Some(1), Some(3)), Ok(ints(&[2, 3])));
        assert_eq!(list.slice(None, Some(-1)), Ok(ints(&[1, 2, 3])));
        assert_eq!(list.slice(Some(3), Some(1)), Ok(ints(&[])));
        assert_eq!(list.slice(Some(-10), None), Ok(ints(&[1, 2, 3, 4])));
        assert_eq!(
            Value::string("hello").slice(Some(1), Some(4)),
            Ok(Value::string("ell"))
        );
    }

    #[test]
    fn with_index_leaves_original_untouched() {
        let original = ints(&[1, 2]);
        let updated = original.with_index(&Value::Int(0), Value::Int(9));
        assert_eq!(updated, Ok(ints(&[9, 2])));
        assert_eq!(original, ints(&[1, 2]));

        let map = Value::map_from([("a", Value::Int(1))]);
        let map2 = map.with_index(&Value::string("b"), Value::Int(2));
        assert_eq!(
            map2,
            Ok(Value::map_from([("a", Value::Int(1)), ("b", Value::Int(2))]))
        );
    }

    #[test]
    fn membership() {
        assert_eq!(ints(&[1, 2]).contains(&Value::Int(2)), Ok(true));
        assert_eq!(
            Value::map_from([("k", Value::Nil)]).contains(&Value::string("k")),
            Ok(true)
        );
        assert_eq!(
            Value::string("haystack").contains(&Value::string("st")),
            Ok(true)
        );
        assert_eq!(
            Value::Int(3).contains(&Value::Int(3)).map_err(|e| e.kind),
            Err(EvalErrorKind::NotAContainer {
                type_name: "int".to_string()
            })
        );
    }

    #[test]
    fn iter_only_for_containers() {
        assert!(ints(&[1]).iter().is_some());
        assert!(Value::string("ab").iter().is_some());
        assert!(Value::Int(1).iter().is_none());
        assert!(Value::Nil.iter().is_none());
    }

    #[test]
    fn map_iteration_is_key_ordered() {
        let map = Value::map_from([("b", Value::Int(2)), ("a", Value::Int(1))]);
        let keys: Vec<Value> = map
            .iter()
            .map(|it| it.collect_entries().into_iter().map(|e| e.key).collect())
            .unwrap_or_default();
        assert_eq!(keys, vec![Value::string("a"), Value::string("b")]);
    }
}

mod attributes {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_exposes_name_and_module() {
        let builtin = Value::builtin(Builtin::noop("get", Some("http")));
        assert_eq!(builtin.get_attr("__name__"), Some(Value::string("get")));
        assert_eq!(builtin.get_attr("__module__"), Some(Value::string("http")));
        assert_eq!(builtin.get_attr("other"), None);

        let plain = Value::builtin(Builtin::noop("len", None));
        assert_eq!(plain.get_attr("__module__"), Some(Value::Nil));
    }

    #[test]
    fn module_members() {
        let module = Value::module(Module::new("math").with_member("pi", Value::Float(2.5)));
        assert_eq!(module.get_attr("pi"), Some(Value::Float(2.5)));
        assert_eq!(module.get_attr("tau"), None);
    }
}
