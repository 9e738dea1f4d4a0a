//! Prefix and infix operator semantics.
//!
//! Dispatch is a `match` on operand types. `&&` and `||` are short-circuited
//! by the evaluator before reaching here; when both operands are already in
//! hand they combine truthiness.

use rook_ir::{BinaryOp, PrefixOp};
use std::cmp::Ordering;
use std::sync::Arc;

use crate::errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, invalid_prefix_op, EvalError,
};
use crate::Value;

type OpResult = Result<Value, EvalError>;

#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> OpResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

#[inline]
fn checked_div(b: i64, op: impl FnOnce() -> Option<i64>, op_name: &'static str) -> OpResult {
    if b == 0 {
        Err(division_by_zero())
    } else {
        op().map(Value::Int).ok_or_else(|| integer_overflow(op_name))
    }
}

fn compare(ordering: Ordering, op: BinaryOp) -> Option<bool> {
    match op {
        BinaryOp::Eq => Some(ordering == Ordering::Equal),
        BinaryOp::NotEq => Some(ordering != Ordering::Equal),
        BinaryOp::Lt => Some(ordering == Ordering::Less),
        BinaryOp::LtEq => Some(ordering != Ordering::Greater),
        BinaryOp::Gt => Some(ordering == Ordering::Greater),
        BinaryOp::GtEq => Some(ordering != Ordering::Less),
        _ => None,
    }
}

/// Evaluate `left op right`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers hand over freshly evaluated operands"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "mixed int/float arithmetic promotes to float"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::And => return Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => return Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        _ => {}
    }

    let mismatch = || binary_type_mismatch(op.as_symbol(), left.type_name(), right.type_name());
    let typed = match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Int(a), Value::Float(b)) => eval_float_binary(*a as f64, *b, op),
        (Value::Float(a), Value::Int(b)) => eval_float_binary(*a, *b as f64, op),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(*a, *b, op),
        (Value::Str(a), Value::Str(b)) => eval_str_binary(a, b, op),
        (Value::Str(s), Value::Int(n)) if op == BinaryOp::Mul => Some(repeat_str(s, *n)),
        (Value::List(a), Value::List(b)) if op == BinaryOp::Add => {
            let mut items = Vec::with_capacity(a.len() + b.len());
            items.extend(a.iter().cloned());
            items.extend(b.iter().cloned());
            Some(Ok(Value::list(items)))
        }
        _ => None,
    };
    if let Some(result) = typed {
        return result;
    }
    match op {
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        _ => Err(mismatch()),
    }
}

/// `None` when the operator does not apply to integers.
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> Option<OpResult> {
    let result = match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => checked_div(b, || a.checked_div(b), "division"),
        BinaryOp::Mod => checked_div(b, || a.checked_rem(b), "remainder"),
        BinaryOp::Pow => int_pow(a, b),
        _ => Ok(Value::Bool(compare(a.cmp(&b), op)?)),
    };
    Some(result)
}

/// Negative exponents fall back to float.
#[expect(clippy::cast_precision_loss, reason = "negative exponent yields a float")]
fn int_pow(base: i64, exp: i64) -> OpResult {
    match u32::try_from(exp) {
        Ok(exp) => checked_arith(base.checked_pow(exp), "exponentiation"),
        Err(_) if exp < 0 => Ok(Value::Float((base as f64).powf(exp as f64))),
        Err(_) => Err(integer_overflow("exponentiation")),
    }
}

fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> Option<OpResult> {
    let value = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div if b == 0.0 => return Some(Err(division_by_zero())),
        BinaryOp::Div => a / b,
        BinaryOp::Mod if b == 0.0 => return Some(Err(division_by_zero())),
        BinaryOp::Mod => a % b,
        BinaryOp::Pow => a.powf(b),
        _ => return a.partial_cmp(&b).map_or(
            // NaN compares unequal to everything.
            Some(Ok(Value::Bool(op == BinaryOp::NotEq))),
            |ordering| compare(ordering, op).map(|holds| Ok(Value::Bool(holds))),
        ),
    };
    Some(Ok(Value::Float(value)))
}

fn eval_str_binary(a: &Arc<str>, b: &Arc<str>, op: BinaryOp) -> Option<OpResult> {
    if op == BinaryOp::Add {
        let mut joined = String::with_capacity(a.len() + b.len());
        joined.push_str(a);
        joined.push_str(b);
        return Some(Ok(Value::string(joined)));
    }
    compare(a.cmp(b), op).map(|holds| Ok(Value::Bool(holds)))
}

fn repeat_str(s: &str, times: i64) -> OpResult {
    let times = usize::try_from(times.max(0)).map_err(|_| integer_overflow("repetition"))?;
    s.len()
        .checked_mul(times)
        .ok_or_else(|| integer_overflow("repetition"))?;
    Ok(Value::string(s.repeat(times)))
}

/// Evaluate `op operand`.
pub fn evaluate_prefix(op: PrefixOp, operand: &Value) -> OpResult {
    match (op, operand) {
        (PrefixOp::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (PrefixOp::Neg, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (PrefixOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (PrefixOp::Neg, other) => Err(invalid_prefix_op(op.as_symbol(), other.type_name())),
    }
}
