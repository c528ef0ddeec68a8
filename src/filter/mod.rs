//! Traversal decorators that hide test files and generated files.
//!
//! Both filters implement [`Traversal`](crate::inspector::Traversal) and
//! produce exactly the events the wrapped engine would produce if every
//! excluded source file had been removed from the tree beforehand.
//!
//! - [`Filter`] wraps an engine with all three traversal operations and
//!   applies the exclusion check inline in each.
//! - [`StackFilter`] wraps an engine offering only
//!   [`StackTraversal`](crate::inspector::StackTraversal) and derives
//!   preorder and prune-only traversal from it.
//!
//! Source-file nodes must always be seen to evaluate the policy, so when the
//! caller did not ask for them the type set is extended with
//! [`SOURCE_FILE`] and their events are swallowed. Only forwarding is gated
//! on the caller's interest, never descent.

mod full;
mod policy;
mod stack;

use std::borrow::Cow;

use crate::ast::{NodeKind, SOURCE_FILE};
use crate::inspector::{matches, with_kind};

pub use full::Filter;
pub use policy::{Exclusion, ExclusionPolicy, GENERATED_MARKER, TEST_FILE_SUFFIX};
pub use stack::StackFilter;

/// Per-call bookkeeping: the type set handed to the engine, and whether the
/// caller itself wants source-file events.
pub(crate) struct Interest<'t> {
    pub(crate) types: Cow<'t, [NodeKind]>,
    pub(crate) explicit: bool,
}

impl<'t> Interest<'t> {
    /// Bookkeeping for the full-capability filter.
    ///
    /// Only a literal [`SOURCE_FILE`] entry counts as containing it; an empty
    /// set is then recognised separately as a wildcard. Extending a wildcard
    /// leaves it untouched.
    pub(crate) fn listed(types: &'t [NodeKind]) -> Self {
        let contains = types.contains(&SOURCE_FILE);
        Self {
            types: with_kind(types, SOURCE_FILE),
            explicit: contains || types.is_empty(),
        }
    }

    /// Bookkeeping for the stack-only filter.
    ///
    /// An empty set already selects [`SOURCE_FILE`], so it never needs extending.
    pub(crate) fn selected(types: &'t [NodeKind]) -> Self {
        let explicit = matches(types, SOURCE_FILE);
        let types = if explicit {
            Cow::Borrowed(types)
        } else {
            let mut extended = types.to_vec();
            extended.push(SOURCE_FILE);
            Cow::Owned(extended)
        };
        Self { types, explicit }
    }
}
