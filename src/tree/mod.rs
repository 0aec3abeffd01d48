//! The [`Tree`] facade and its operations.
//!
//! A `Tree` pairs exactly one node with the children key it was built with.
//! Operations which produce further wrappers — [`children`](Tree::children),
//! [`find`](Tree::find), [`flatten`](Tree::flatten),
//! [`find_path`](Tree::find_path), [`find_siblings`](Tree::find_siblings),
//! [`bottoms`](Tree::bottoms), [`map`](Tree::map) — always propagate that
//! same key, so a tree built over, say, `"nodes"` stays a `"nodes"` tree all
//! the way down.
//!
//! # Example
//! ```rust
//! use sapling::Tree;
//! use serde_json::json;
//!
//! let org = json!({
//!     "name": "root",
//!     "units": [
//!         { "name": "ops" },
//!         { "name": "eng", "units": [{ "name": "platform" }] },
//!     ],
//! });
//! let tree = Tree::with_children_key(&org, "units");
//!
//! // The path to a node runs from the root down to the match itself.
//! let path = tree.find_path(|n| n["name"] == "platform")?;
//! let names: Vec<_> = path.iter().map(|t| t.src()["name"].clone()).collect();
//! assert_eq!(names, [json!("root"), json!("eng"), json!("platform")]);
//!
//! // Leaves, in pre-order.
//! let leaves: Vec<_> = tree
//!     .bottoms()?
//!     .iter()
//!     .map(|t| t.src()["name"].clone())
//!     .collect();
//! assert_eq!(leaves, [json!("ops"), json!("platform")]);
//! # Ok::<(), sapling::TreeError>(())
//! ```

use std::borrow::Cow;

use serde_json::Value;

use crate::{traversal, util, TreeError};

/// The children key used when none is specified: `"children"`.
pub const DEFAULT_CHILDREN_KEY: &str = "children";

/// The maximum depth any traversal will descend to before failing with
/// [`TreeError::DepthExceeded`].
///
/// `serde_json` values cannot be cyclic, so this guards against
/// pathologically deep input rather than infinite loops. It matches the
/// default recursion limit `serde_json` applies when parsing.
pub const DEPTH_LIMIT: usize = 128;

/// An immutable facade over one node of a JSON-like tree.
///
/// A `Tree` either borrows a node owned by the caller (the usual case, as
/// produced by [`Tree::new`] and every traversal operation) or owns its node
/// outright (the empty tree and the output of [`Tree::map`] and
/// [`Tree::from_json`]). Both forms behave identically.
#[derive(Clone, Debug)]
pub struct Tree<'a> {
    src: Cow<'a, Value>,
    children_key: Cow<'a, str>,
}

impl<'a> Tree<'a> {
    /// Wraps a node using [`DEFAULT_CHILDREN_KEY`].
    #[inline]
    pub fn new(node: &'a Value) -> Self {
        Self::with_children_key(node, DEFAULT_CHILDREN_KEY)
    }
    /// Wraps a node whose child sequences live under `children_key`.
    ///
    /// The key is propagated to every wrapper this tree ever produces.
    #[inline]
    pub fn with_children_key(node: &'a Value, children_key: &'a str) -> Self {
        Self {
            src: Cow::Borrowed(node),
            children_key: Cow::Borrowed(children_key),
        }
    }
    /// Creates the empty tree: a wrapper around a record with no fields.
    ///
    /// This is also the sentinel [`find`](Self::find) returns when nothing
    /// matches.
    #[inline]
    pub fn empty() -> Tree<'static> {
        Tree {
            src: Cow::Owned(traversal::empty_node()),
            children_key: Cow::Owned(DEFAULT_CHILDREN_KEY.to_owned()),
        }
    }
    /// Parses a tree from its JSON interchange form.
    ///
    /// The resulting tree owns its node graph and uses
    /// [`DEFAULT_CHILDREN_KEY`].
    ///
    /// # Errors
    /// [`TreeError::Json`] if `source` is not valid JSON.
    pub fn from_json(source: &str) -> Result<Tree<'static>, TreeError> {
        let node: Value = serde_json::from_str(source)?;
        Ok(Tree {
            src: Cow::Owned(node),
            children_key: Cow::Owned(DEFAULT_CHILDREN_KEY.to_owned()),
        })
    }

    /// Returns the wrapped node.
    #[inline]
    pub fn src(&self) -> &Value {
        self.src.as_ref()
    }
    /// Returns the children key this tree was built with.
    #[inline]
    pub fn children_key(&self) -> &str {
        self.children_key.as_ref()
    }
    /// Extracts the wrapped node, cloning it if the tree was borrowing.
    #[inline]
    pub fn into_src(self) -> Value {
        self.src.into_owned()
    }
    /// Serializes the wrapped node to its JSON interchange form.
    ///
    /// # Errors
    /// [`TreeError::Json`] — cannot realistically fail for `Value` input, but
    /// the serializer's contract is fallible.
    pub fn to_json(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string(self.src())?)
    }

    /// Returns whether this is the empty tree, i.e. the wrapped node has no
    /// fields of its own.
    ///
    /// This is how "not found" results of [`find`](Self::find) are detected.
    /// Note the distinction from a tree with no *children*: a node may carry
    /// plenty of fields and still be a leaf.
    #[inline]
    pub fn is_empty(&self) -> bool {
        match self.src() {
            Value::Object(fields) => fields.is_empty(),
            Value::Null => true,
            _ => false,
        }
    }

    /// Returns a wrapper for each of this node's children, in order.
    ///
    /// A node without a children field (or with an explicit `null` there) and
    /// a node with an empty child sequence both yield an empty vec.
    ///
    /// # Errors
    /// [`TreeError::InvalidStructure`] if the children field holds anything
    /// other than an array.
    pub fn children(&self) -> Result<Vec<Tree<'_>>, TreeError> {
        let children = util::children_slice(self.src(), self.children_key())?;
        Ok(children
            .unwrap_or_default()
            .iter()
            .map(|child| self.wrap(child))
            .collect())
    }

    /// Flattens the whole tree into a pre-order sequence of wrappers: the
    /// root first, then each child's full subtree in order.
    ///
    /// # Errors
    /// [`TreeError::InvalidStructure`] on a malformed children field,
    /// [`TreeError::DepthExceeded`] past [`DEPTH_LIMIT`] levels.
    pub fn flatten(&self) -> Result<Vec<Tree<'_>>, TreeError> {
        let mut nodes = Vec::new();
        traversal::flatten(self.src(), self.children_key(), 0, &mut nodes)?;
        Ok(nodes.into_iter().map(|node| self.wrap(node)).collect())
    }

    /// Returns every bottom-level node: the wrappers from the flattened
    /// traversal whose own child list is empty.
    ///
    /// This is flatten-then-filter on purpose — any leaf anywhere in the tree
    /// qualifies, so there is nothing to prune.
    ///
    /// # Errors
    /// Same conditions as [`flatten`](Self::flatten).
    pub fn bottoms(&self) -> Result<Vec<Tree<'_>>, TreeError> {
        let mut bottoms = Vec::new();
        for subtree in self.flatten()? {
            let children = util::children_slice(subtree.src(), self.children_key())?;
            if children.map_or(true, <[Value]>::is_empty) {
                bottoms.push(subtree);
            }
        }
        Ok(bottoms)
    }

    /// Finds the first node, in depth-first pre-order, for which `predicate`
    /// returns `true`, and returns it as a subtree.
    ///
    /// The current node is tested before its children; once an earlier
    /// subtree produces a match, later siblings are not visited at all. The
    /// predicate receives raw nodes, not wrappers.
    ///
    /// When nothing matches, the *empty tree* is returned rather than an
    /// error — check [`is_empty`](Self::is_empty) on the result.
    ///
    /// # Errors
    /// Same conditions as [`flatten`](Self::flatten).
    pub fn find<P>(&self, mut predicate: P) -> Result<Tree<'_>, TreeError>
    where
        P: FnMut(&Value) -> bool,
    {
        let found = traversal::find(self.src(), &mut predicate, self.children_key(), 0)?;
        Ok(match found {
            Some(node) => self.wrap(node),
            None => Tree {
                src: Cow::Owned(traversal::empty_node()),
                children_key: Cow::Borrowed(self.children_key()),
            },
        })
    }

    /// Finds the first matching node exactly as [`find`](Self::find) does,
    /// but returns the full root-to-match path: ancestors first, the matched
    /// node last.
    ///
    /// Returns an empty sequence when no node matches.
    ///
    /// # Errors
    /// Same conditions as [`flatten`](Self::flatten).
    pub fn find_path<P>(&self, mut predicate: P) -> Result<Vec<Tree<'_>>, TreeError>
    where
        P: FnMut(&Value) -> bool,
    {
        let mut path = Vec::new();
        let matched =
            traversal::find_path(self.src(), &mut predicate, self.children_key(), 0, &mut path)?;
        if !matched {
            debug_assert!(path.is_empty());
            return Ok(Vec::new());
        }
        Ok(path.into_iter().map(|node| self.wrap(node)).collect())
    }

    /// Returns the matched node together with all of its siblings, in order:
    /// the [`children`](Self::children) of the matched node's parent.
    ///
    /// When the match is the root itself, or nothing matches, there is no
    /// parent to take siblings from; the result is then a one-element
    /// sequence holding this tree unchanged. Callers telling "self" apart
    /// from true siblings reapply the predicate or compare by key.
    ///
    /// # Errors
    /// Same conditions as [`flatten`](Self::flatten).
    pub fn find_siblings<P>(&self, mut predicate: P) -> Result<Vec<Tree<'_>>, TreeError>
    where
        P: FnMut(&Value) -> bool,
    {
        // Raw path rather than find_path's wrappers, so that the parent's
        // children can be rewrapped off self's graph directly.
        let mut path = Vec::new();
        let matched =
            traversal::find_path(self.src(), &mut predicate, self.children_key(), 0, &mut path)?;
        if !matched || path.len() < 2 {
            return Ok(vec![self.clone()]);
        }
        let parent = path[path.len() - 2];
        let children = util::children_slice(parent, self.children_key())?;
        Ok(children
            .unwrap_or_default()
            .iter()
            .map(|child| self.wrap(child))
            .collect())
    }

    /// Builds a topologically identical tree whose every node is replaced by
    /// the record `transform` returns for the original node.
    ///
    /// The replacement node's fields are exactly the transform output's
    /// fields; iff the original node carried a children field, the
    /// recursively mapped children are attached under the same key,
    /// overwriting any children the transform itself produced. The input
    /// graph is never touched; the result owns its nodes outright.
    ///
    /// # Errors
    /// [`TreeError::NonRecordTransform`] if `transform` returns a non-object
    /// value, plus the same conditions as [`flatten`](Self::flatten).
    pub fn map<F>(&self, mut transform: F) -> Result<Tree<'static>, TreeError>
    where
        F: FnMut(&Value) -> Value,
    {
        let mapped = traversal::map(self.src(), &mut transform, self.children_key(), 0)?;
        Ok(Tree {
            src: Cow::Owned(mapped),
            children_key: Cow::Owned(self.children_key().to_owned()),
        })
    }

    /// Compares two trees by a single identifier field, not structurally.
    ///
    /// Returns `true` only when *both* wrapped nodes hold a truthy value
    /// under `key` and those values are equal. A falsy value (`null`,
    /// `false`, `0`, `""`) counts as absent, so a tree wrapping
    /// `{"id": 0}` equals nothing — including another `{"id": 0}`. This
    /// truthiness quirk is inherited behavior, kept deliberately.
    #[inline]
    pub fn equals(&self, other: &Tree<'_>, key: &str) -> bool {
        match (self.src().get(key), other.src().get(key)) {
            (Some(own), Some(theirs)) => {
                util::is_truthy(own) && util::is_truthy(theirs) && own == theirs
            }
            _ => false,
        }
    }

    /// Wraps a node borrowed from this tree's graph, carrying the key over.
    #[inline]
    fn wrap<'s>(&'s self, node: &'s Value) -> Tree<'s> {
        Tree {
            src: Cow::Borrowed(node),
            children_key: Cow::Borrowed(self.children_key()),
        }
    }
}

impl<'a> From<&'a Value> for Tree<'a> {
    #[inline]
    fn from(node: &'a Value) -> Self {
        Self::new(node)
    }
}
impl Default for Tree<'static> {
    /// The empty tree.
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}
