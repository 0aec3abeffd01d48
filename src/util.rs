use serde_json::Value;

use crate::TreeError;

/// Looks up a node's child sequence under the given key.
///
/// Absent and `null` both mean "no children"; any other non-array value is a
/// structural error rather than something to coerce around.
pub(crate) fn children_slice<'v>(
    node: &'v Value,
    children_key: &str,
) -> Result<Option<&'v [Value]>, TreeError> {
    match node.get(children_key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(children)) => Ok(Some(children)),
        Some(_) => Err(TreeError::InvalidStructure {
            children_key: children_key.to_owned(),
        }),
    }
}

/// JavaScript-style truthiness, used by the key-equality check.
///
/// `null`, `false`, `0` and `""` are falsy; arrays and objects are always
/// truthy, even when empty. JSON cannot hold `NaN`, so numbers other than
/// zero are truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
