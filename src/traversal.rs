//! Recursive traversal algorithms over raw `serde_json::Value` graphs.
//!
//! Each function threads the children key, a depth counter and (where one is
//! needed) an accumulator through the recursion explicitly. Keeping every
//! piece of traversal state on the current call stack is what makes the
//! public operations reentrant: a predicate may start another traversal, and
//! independent trees may be walked from separate threads, without any two
//! walks sharing state.

use serde_json::{Map, Value};

use crate::{
    tree::DEPTH_LIMIT,
    util::children_slice,
    TreeError,
};

#[inline]
fn check_depth(depth: usize) -> Result<(), TreeError> {
    if depth >= DEPTH_LIMIT {
        Err(TreeError::DepthExceeded { limit: DEPTH_LIMIT })
    } else {
        Ok(())
    }
}

/// Depth-first pre-order search, short-circuiting on the first match.
///
/// The current node is tested before any of its children; sibling subtrees
/// after a matching one are never visited.
pub(crate) fn find<'v, P>(
    node: &'v Value,
    predicate: &mut P,
    children_key: &str,
    depth: usize,
) -> Result<Option<&'v Value>, TreeError>
where
    P: FnMut(&Value) -> bool,
{
    check_depth(depth)?;
    if predicate(node) {
        return Ok(Some(node));
    }
    if let Some(children) = children_slice(node, children_key)? {
        for child in children {
            if let Some(found) = find(child, predicate, children_key, depth + 1)? {
                return Ok(Some(found));
            }
        }
    }
    Ok(None)
}

/// Depth-first pre-order path search with backtracking.
///
/// Pushes the current node onto `path` before testing it; on a match the
/// accumulator holds the full root-to-match path and is left as-is. When no
/// node in the current subtree matches, the current node is popped back off
/// before returning.
pub(crate) fn find_path<'v, P>(
    node: &'v Value,
    predicate: &mut P,
    children_key: &str,
    depth: usize,
    path: &mut Vec<&'v Value>,
) -> Result<bool, TreeError>
where
    P: FnMut(&Value) -> bool,
{
    check_depth(depth)?;
    path.push(node);
    if predicate(node) {
        return Ok(true);
    }
    if let Some(children) = children_slice(node, children_key)? {
        for child in children {
            if find_path(child, predicate, children_key, depth + 1, path)? {
                return Ok(true);
            }
        }
    }
    path.pop();
    Ok(false)
}

/// Depth-first pre-order flattening: the node itself, then each child's full
/// subtree in order.
pub(crate) fn flatten<'v>(
    node: &'v Value,
    children_key: &str,
    depth: usize,
    out: &mut Vec<&'v Value>,
) -> Result<(), TreeError> {
    check_depth(depth)?;
    out.push(node);
    if let Some(children) = children_slice(node, children_key)? {
        for child in children {
            flatten(child, children_key, depth + 1, out)?;
        }
    }
    Ok(())
}

/// Structure-preserving transformation into a wholly new node graph.
///
/// The replacement node's fields come from the transform's output alone; the
/// children field is then attached (or overwritten) with the recursively
/// mapped children iff the original node carried one.
pub(crate) fn map<F>(
    node: &Value,
    transform: &mut F,
    children_key: &str,
    depth: usize,
) -> Result<Value, TreeError>
where
    F: FnMut(&Value) -> Value,
{
    check_depth(depth)?;
    let mut new_node = match transform(node) {
        Value::Object(fields) => fields,
        _ => return Err(TreeError::NonRecordTransform),
    };
    if let Some(children) = children_slice(node, children_key)? {
        let mapped = children
            .iter()
            .map(|child| map(child, transform, children_key, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;
        new_node.insert(children_key.to_owned(), Value::Array(mapped));
    }
    Ok(Value::Object(new_node))
}

/// Builds an empty record, the canonical empty tree and not-found sentinel.
#[inline]
pub(crate) fn empty_node() -> Value {
    Value::Object(Map::new())
}
