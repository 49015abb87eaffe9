//! Strategy: how bound nodes become something executable.
//!
//! The builder never evaluates anything. It hands validated group nodes to a
//! [`Strategy`], and validated rule/relation nodes to the bind functions that were
//! registered with the schema (conventionally produced by strategy helpers such as
//! [`ObjectStrategy::rule`](crate::ObjectStrategy::rule)).
//!
//! Strategies vary by host application: the bundled [`ObjectStrategy`](crate::ObjectStrategy)
//! evaluates against in-memory objects; a query-building strategy would produce SQL
//! fragments instead.

use std::fmt::Debug;

use crate::GroupType;

/// Policy that turns validated group nodes into bound filters.
///
/// # Thread Safety
///
/// Strategies are stored in an immutable [`Configuration`](crate::Configuration)
/// that may be shared across threads, so implementations must be `Send + Sync`.
pub trait Strategy: Send + Sync + Debug {
    /// The bound filter type this strategy produces.
    type Filter;

    /// Combine already-bound children under `group`.
    ///
    /// Called for every valid group node, with whichever children survived
    /// validation (possibly none).
    fn make_group(&self, group: GroupType, children: Vec<Self::Filter>) -> Self::Filter;
}

/// A bound filter that can test a target object.
pub trait BoundFilter<T: ?Sized> {
    /// Returns `true` if `object` satisfies this filter.
    fn adheres(&self, object: &T) -> bool;
}

impl<T: ?Sized, F: BoundFilter<T> + ?Sized> BoundFilter<T> for Box<F> {
    fn adheres(&self, object: &T) -> bool {
        (**self).adheres(object)
    }
}
