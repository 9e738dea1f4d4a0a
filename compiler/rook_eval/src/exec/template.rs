//! String template assembly.

use rook_ir::{Fragment, NodeId, StringInterner, Template};
use rook_value::{ControlAction, Value};

/// Append a slot value: strings splice their raw text, anything else its
/// inspected form.
pub fn splice(out: &mut String, value: &Value) {
    match value {
        Value::Str(s) => out.push_str(s),
        other => out.push_str(&other.inspect()),
    }
}

/// Render `template`, evaluating slot expressions in declared order.
///
/// Slots are matched to expressions by position; an absent expression
/// renders as empty text. The first failing expression aborts the whole
/// literal.
pub fn render<F>(
    template: &Template,
    interner: &StringInterner,
    mut eval_fn: F,
) -> Result<String, ControlAction>
where
    F: FnMut(NodeId) -> Result<Value, ControlAction>,
{
    let mut out = String::new();
    let mut exprs = template.exprs.iter();
    for fragment in &template.fragments {
        match fragment {
            Fragment::Text(text) => out.push_str(interner.lookup(*text)),
            Fragment::Slot => {
                if let Some(expr) = exprs.next().copied().flatten() {
                    splice(&mut out, &eval_fn(expr)?);
                }
            }
        }
    }
    Ok(out)
}
