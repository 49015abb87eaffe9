//! Object strategy: evaluate bound filters against in-memory objects.
//!
//! Rules read a [`FieldValue`] from the object through an accessor supplied at
//! registration time; relations read a slice of related objects and pass if any one
//! of them satisfies the relation's children.
//!
//! # INV: None → false
//!
//! A rule whose accessor returns [`FieldValue::None`] never passes.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::{BoundFilter, FieldValue, GroupType, Operation, RuleValue, Scalar, Strategy};

type Accessor<T> = Arc<dyn Fn(&T) -> FieldValue + Send + Sync>;
type RelationTest<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

// ═══════════════════════════════════════════════════════════════════════════════
// Filter
// ═══════════════════════════════════════════════════════════════════════════════

/// A bound filter over objects of type `T`.
pub enum ObjectFilter<T> {
    /// AND/OR over child filters.
    Group {
        /// The combinator.
        group: GroupType,
        /// Bound children.
        children: Vec<ObjectFilter<T>>,
    },
    /// A single comparison.
    Rule {
        /// The comparison.
        operation: Operation,
        /// The validated payload value.
        value: RuleValue,
        /// Reads the compared field.
        read: Accessor<T>,
    },
    /// Existential test over a related collection.
    ///
    /// The related filter type is erased; only its shape is kept for introspection.
    Relation {
        /// The combinator applied to each related object.
        group: GroupType,
        /// Number of bound children.
        children: usize,
        /// Nesting depth of this node.
        depth: usize,
        /// Evaluates the relation.
        test: RelationTest<T>,
    },
}

impl<T> ObjectFilter<T> {
    /// Returns `true` if `object` satisfies this filter.
    ///
    /// AND groups stop at the first failing child, OR groups at the first passing
    /// one. An empty AND is `true`, an empty OR is `false`.
    pub fn adheres(&self, object: &T) -> bool {
        match self {
            Self::Group {
                group: GroupType::And,
                children,
            } => children.iter().all(|c| c.adheres(object)),
            Self::Group {
                group: GroupType::Or,
                children,
            } => children.iter().any(|c| c.adheres(object)),
            Self::Rule {
                operation,
                value,
                read,
            } => compare(*operation, value, &read(object)),
            Self::Relation { test, .. } => test(object),
        }
    }

    /// Nesting depth of this filter tree. Leaves count as one level.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Group { children, .. } => {
                1 + children.iter().map(Self::depth).max().unwrap_or(0)
            }
            Self::Rule { .. } => 1,
            Self::Relation { depth, .. } => *depth,
        }
    }

    /// Returns `true` for [`ObjectFilter::Group`].
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }

    /// Returns `true` for [`ObjectFilter::Rule`].
    #[must_use]
    pub fn is_rule(&self) -> bool {
        matches!(self, Self::Rule { .. })
    }

    /// Returns `true` for [`ObjectFilter::Relation`].
    #[must_use]
    pub fn is_relation(&self) -> bool {
        matches!(self, Self::Relation { .. })
    }
}

impl<T> BoundFilter<T> for ObjectFilter<T> {
    fn adheres(&self, object: &T) -> bool {
        ObjectFilter::adheres(self, object)
    }
}

impl<T> fmt::Debug for ObjectFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group { group, children } => {
                let mut tuple = f.debug_tuple(match group {
                    GroupType::And => "And",
                    GroupType::Or => "Or",
                });
                for child in children {
                    tuple.field(child);
                }
                tuple.finish()
            }
            Self::Rule {
                operation, value, ..
            } => f
                .debug_struct("Rule")
                .field("operation", operation)
                .field("value", value)
                .finish_non_exhaustive(),
            Self::Relation {
                group, children, ..
            } => f
                .debug_struct("Relation")
                .field("group", group)
                .field("children", children)
                .finish_non_exhaustive(),
        }
    }
}

fn compare(operation: Operation, expected: &RuleValue, actual: &FieldValue) -> bool {
    if actual.is_none() {
        return false; // INV: None → false
    }
    match (operation, expected) {
        (Operation::Equals, RuleValue::Scalar(s)) => actual.equals(s),
        (Operation::OneOf, RuleValue::List(items)) => items.iter().any(|s| actual.equals(s)),
        (Operation::StartsWith, RuleValue::Scalar(Scalar::String(prefix))) => actual
            .as_str()
            .is_some_and(|s| s.starts_with(prefix.as_str())),
        (Operation::LessThan, RuleValue::Scalar(s)) => actual.compare(s) == Some(Ordering::Less),
        (Operation::GreaterThan, RuleValue::Scalar(s)) => {
            actual.compare(s) == Some(Ordering::Greater)
        }
        _ => false,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Strategy
// ═══════════════════════════════════════════════════════════════════════════════

/// Reference strategy producing [`ObjectFilter`]s.
///
/// ```
/// use sift::prelude::*;
///
/// #[derive(Debug)]
/// struct Book { title: String, pages: i64 }
///
/// let bind = ObjectStrategy::rule(|b: &Book| b.pages.into());
/// let short = bind(Operation::LessThan, RuleValue::Scalar(Scalar::Int(200)));
///
/// let books = [
///     Book { title: "Dune".into(), pages: 412 },
///     Book { title: "Siddhartha".into(), pages: 152 },
/// ];
/// let titles: Vec<_> = ObjectStrategy::filter(&books, &short).map(|b| b.title.as_str()).collect();
/// assert_eq!(titles, ["Siddhartha"]);
/// ```
pub struct ObjectStrategy<T> {
    _marker: PhantomData<fn(&T)>,
}

impl<T> ObjectStrategy<T> {
    /// Create the strategy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Iterate over the `records` that satisfy `filter`.
    pub fn filter<'a, I>(records: I, filter: &'a ObjectFilter<T>) -> impl Iterator<Item = &'a T> + 'a
    where
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: 'a,
        T: 'a,
    {
        records.into_iter().filter(move |record| filter.adheres(record))
    }
}

impl<T: 'static> ObjectStrategy<T> {
    /// Rule bind function reading the compared field with `accessor`.
    pub fn rule<A>(accessor: A) -> impl Fn(Operation, RuleValue) -> ObjectFilter<T> + Send + Sync + 'static
    where
        A: Fn(&T) -> FieldValue + Send + Sync + 'static,
    {
        let read: Accessor<T> = Arc::new(accessor);
        move |operation: Operation, value: RuleValue| ObjectFilter::Rule {
            operation,
            value,
            read: Arc::clone(&read),
        }
    }

    /// Relation bind function reading the related collection with `accessor`.
    ///
    /// The bound filter passes if at least one related object satisfies the
    /// children combined under the relation's group type.
    pub fn relation<R, A>(
        accessor: A,
    ) -> impl Fn(GroupType, Vec<ObjectFilter<R>>) -> ObjectFilter<T> + Send + Sync + 'static
    where
        R: 'static,
        A: for<'a> Fn(&'a T) -> &'a [R] + Send + Sync + 'static,
    {
        let accessor = Arc::new(accessor);
        move |group: GroupType, children: Vec<ObjectFilter<R>>| {
            let count = children.len();
            let inner = ObjectFilter::Group { group, children };
            let depth = inner.depth();
            let accessor = Arc::clone(&accessor);
            ObjectFilter::Relation {
                group,
                children: count,
                depth,
                test: Box::new(move |object: &T| {
                    accessor(object).iter().any(|related| inner.adheres(related))
                }),
            }
        }
    }
}

impl<T> Default for ObjectStrategy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ObjectStrategy<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ObjectStrategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStrategy").finish()
    }
}

impl<T> Strategy for ObjectStrategy<T> {
    type Filter = ObjectFilter<T>;

    fn make_group(&self, group: GroupType, children: Vec<ObjectFilter<T>>) -> ObjectFilter<T> {
        ObjectFilter::Group { group, children }
    }
}
