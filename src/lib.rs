//! Schema-free tree traversal and transformation over JSON-like nested structures.
//!
//! # Overview
//! Sapling operates on trees of unknown, heterogeneous shape: any
//! [`serde_json::Value`] whose objects may carry an ordered child sequence
//! under a designated *children key* (`"children"` unless you say otherwise).
//! No schema is declared up front — nodes are opaque records and may hold any
//! additional fields, such as the identifier field used by [`Tree::equals`].
//!
//! The central type is [`Tree`], an immutable facade pairing exactly one node
//! with its children key. Every operation is a pure function: it returns plain
//! values, new `Tree` wrappers borrowing the original graph, or (for
//! [`Tree::map`]) a wholly new graph. The wrapped node is never mutated.
//!
//! ```rust
//! use sapling::Tree;
//! use serde_json::json;
//!
//! let data = json!({
//!     "id": 1,
//!     "children": [
//!         { "id": 2 },
//!         { "id": 3, "children": [{ "id": 4 }] },
//!     ],
//! });
//! let tree = Tree::new(&data);
//!
//! // Pre-order flattening visits the root first, then each subtree in order.
//! let ids: Vec<_> = tree
//!     .flatten()?
//!     .iter()
//!     .map(|subtree| subtree.src()["id"].clone())
//!     .collect();
//! assert_eq!(ids, [json!(1), json!(2), json!(3), json!(4)]);
//!
//! // Not-found is reported through the empty-tree sentinel, not an error.
//! assert!(tree.find(|node| node["id"] == 17)?.is_empty());
//! # Ok::<(), sapling::TreeError>(())
//! ```
//!
//! # Failure model
//! Traversal fails fast instead of misbehaving silently: a children field
//! whose value is not an array is [`TreeError::InvalidStructure`], and
//! descending more than [`DEPTH_LIMIT`] levels is
//! [`TreeError::DepthExceeded`]. "No match" is *not* an error — [`Tree::find`]
//! hands back an empty tree and [`Tree::find_path`] an empty path, and callers
//! check for those explicitly. Panics raised by caller-supplied predicates or
//! transforms propagate immediately; no partial results are produced.
//!
//! All traversal state lives on the call stack of the operation that needs
//! it, so any number of traversals may run at once — nested through a
//! predicate, or in parallel on separate threads — without interfering.
//!
//! # Public dependencies
//! - `serde_json` (**required**) — `^1`
//!
//! [`serde_json::Value`]: https://docs.rs/serde_json/*/serde_json/enum.Value.html " "

#![warn(
    rust_2018_idioms,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::cargo,
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::inefficient_to_string,
    clippy::items_after_statements,
    clippy::match_same_arms,
    clippy::match_wild_err_arm,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_option,
    clippy::redundant_closure_for_method_calls,
    clippy::single_match_else,
    clippy::string_add_assign,
    clippy::type_repetition_in_bounds,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::dbg_macro,
    clippy::get_unwrap,
    clippy::unwrap_used, // Only .expect() allowed
    clippy::use_debug,
)]
#![deny(anonymous_parameters, bare_trait_objects)]

pub mod tree;
#[doc(no_inline)]
pub use tree::{Tree, DEFAULT_CHILDREN_KEY, DEPTH_LIMIT};

pub(crate) mod traversal;
pub(crate) mod util;

use core::fmt::{self, Display, Formatter};

/// The error type returned by fallible [`Tree`] operations.
///
/// "Not found" is deliberately absent here: [`Tree::find`] reports it through
/// the empty-tree sentinel and [`Tree::find_path`] through an empty sequence.
#[derive(Debug)]
pub enum TreeError {
    /// A node's children field was present but its value was not an array.
    InvalidStructure {
        /// The children key the malformed node was inspected under.
        children_key: String,
    },
    /// The transform passed to [`Tree::map`] returned a value which is not an
    /// object, so there are no fields to build the replacement node from.
    NonRecordTransform,
    /// Traversal descended [`DEPTH_LIMIT`] levels without bottoming out.
    ///
    /// `serde_json` values cannot be cyclic, so this only fires on
    /// pathologically deep (not circular) input.
    DepthExceeded {
        /// The depth limit that was hit.
        limit: usize,
    },
    /// Parsing or serializing the JSON interchange form failed.
    Json(serde_json::Error),
}
impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStructure { children_key } => f.write_fmt(format_args!(
                "children field {children_key:?} is present but is not an array",
            )),
            Self::NonRecordTransform => {
                f.pad("map transform returned a value which is not an object")
            }
            Self::DepthExceeded { limit } => f.write_fmt(format_args!(
                "tree is nested deeper than the traversal limit of {limit} levels",
            )),
            Self::Json(e) => Display::fmt(e, f),
        }
    }
}
impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::InvalidStructure { .. }
            | Self::NonRecordTransform
            | Self::DepthExceeded { .. } => None,
        }
    }
}
impl From<serde_json::Error> for TreeError {
    #[inline]
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
