//! Schema entries: the named rules and relations a configuration permits.
//!
//! # Architecture
//!
//! Bind functions are erased behind boxed closures at registration time and invoked
//! late, during payload traversal. A relation additionally erases its child
//! [`Configuration`]: the closure captures the child schema and its bind function, so
//! a `SchemaEntry<F>` can point at a configuration producing a different filter type.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::builder;
use crate::{
    Configuration, ConstraintType, ErrorSink, FieldSink, FilterError, GroupType, Operation,
    RuleValue, Strategy, Translator,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Type-erased callbacks
// ═══════════════════════════════════════════════════════════════════════════════

/// Type-erased rule bind function.
type BoxedRuleBinder<F> = Box<dyn Fn(Operation, RuleValue) -> F + Send + Sync>;

/// Type-erased extra-validation callback.
type BoxedValidator = Box<dyn Fn(&Value, &mut FieldSink<'_>) + Send + Sync>;

/// Type-erased relation resolver: builds the related children and binds them.
type BoxedRelationResolver<F> =
    Box<dyn Fn(GroupType, &[Value], &mut ErrorSink, usize) -> F + Send + Sync>;

// ═══════════════════════════════════════════════════════════════════════════════
// RuleEntry
// ═══════════════════════════════════════════════════════════════════════════════

/// A leaf entry: a named scalar comparison.
///
/// ```
/// use sift::{ConstraintType, Operation, RuleEntry};
///
/// let entry = RuleEntry::new(
///     "age",
///     ConstraintType::Number,
///     [Operation::GreaterThan],
///     |op, value| format!("age {op} {value:?}"),
/// )
/// .unwrap();
/// assert!(entry.supports(Operation::GreaterThan));
/// assert!(!entry.supports(Operation::Equals));
///
/// // Operations outside the constraint type's set are rejected up front.
/// let err = RuleEntry::new("age", ConstraintType::Number, [Operation::StartsWith], |_, _| ());
/// assert!(err.is_err());
/// ```
pub struct RuleEntry<F> {
    name: String,
    constraint: ConstraintType,
    operations: Vec<Operation>,
    bind: BoxedRuleBinder<F>,
    validation: Option<BoxedValidator>,
}

impl<F> RuleEntry<F> {
    /// Declare a rule.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnsupportedOperation`] if any of `operations` is not
    /// permitted by `constraint`.
    pub fn new<B>(
        name: impl Into<String>,
        constraint: ConstraintType,
        operations: impl IntoIterator<Item = Operation>,
        bind: B,
    ) -> Result<Self, FilterError>
    where
        B: Fn(Operation, RuleValue) -> F + Send + Sync + 'static,
    {
        let name = name.into();
        let mut supported = Vec::new();
        for operation in operations {
            if !constraint.permits(operation) {
                return Err(FilterError::UnsupportedOperation {
                    name,
                    operation,
                    constraint,
                });
            }
            if !supported.contains(&operation) {
                supported.push(operation);
            }
        }
        Ok(Self {
            name,
            constraint,
            operations: supported,
            bind: Box::new(bind),
            validation: None,
        })
    }

    /// Attach an extra-validation callback.
    ///
    /// The callback receives the raw payload `value` (possibly `null`) and may record
    /// any number of messages or field codes. It runs for every rule node with a
    /// parseable operation.
    #[must_use]
    pub fn with_validation<V>(mut self, validation: V) -> Self
    where
        V: Fn(&Value, &mut FieldSink<'_>) + Send + Sync + 'static,
    {
        self.validation = Some(Box::new(validation));
        self
    }

    /// The entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The constraint type.
    #[must_use]
    pub fn constraint(&self) -> ConstraintType {
        self.constraint
    }

    /// Operations enabled for this entry.
    #[must_use]
    pub fn supported_operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns `true` if `operation` is enabled for this entry.
    #[must_use]
    pub fn supports(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    /// Returns `true` if an extra-validation callback is attached.
    #[must_use]
    pub fn has_validation(&self) -> bool {
        self.validation.is_some()
    }

    /// Run the extra-validation callback, if any. Field codes are localized by
    /// `translator`.
    pub fn validate(&self, value: &Value, sink: &mut ErrorSink, translator: &dyn Translator) {
        if let Some(validation) = &self.validation {
            validation(value, &mut FieldSink::new(sink, translator, &self.name));
        }
    }

    /// Invoke the bind function.
    pub fn bind(&self, operation: Operation, value: RuleValue) -> F {
        (self.bind)(operation, value)
    }
}

impl<F> fmt::Debug for RuleEntry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEntry")
            .field("name", &self.name)
            .field("constraint", &self.constraint)
            .field("operations", &self.operations)
            .field("validation", &self.validation.is_some())
            .finish_non_exhaustive()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RelationEntry
// ═══════════════════════════════════════════════════════════════════════════════

/// A named nested collection governed by its own [`Configuration`].
pub struct RelationEntry<F> {
    name: String,
    resolve: BoxedRelationResolver<F>,
}

impl<F> RelationEntry<F> {
    /// Declare a relation.
    ///
    /// `bind` combines the related children (bound by `child`'s own strategy) into a
    /// filter for the parent. `child` is shared, so one schema may back several
    /// relations.
    pub fn new<S, B>(name: impl Into<String>, bind: B, child: Arc<Configuration<S>>) -> Self
    where
        F: 'static,
        S: Strategy + 'static,
        S::Filter: 'static,
        B: Fn(GroupType, Vec<S::Filter>) -> F + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            resolve: Box::new(
                move |group: GroupType, payload: &[Value], sink: &mut ErrorSink, depth: usize| {
                    let children = builder::make_children(&*child, payload, sink, depth);
                    bind(group, children)
                },
            ),
        }
    }

    /// The entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build `payload` against the child configuration and bind the result.
    ///
    /// `depth` is the nesting depth of the relation node itself.
    pub(crate) fn resolve(
        &self,
        group: GroupType,
        payload: &[Value],
        sink: &mut ErrorSink,
        depth: usize,
    ) -> F {
        (self.resolve)(group, payload, sink, depth)
    }
}

impl<F> fmt::Debug for RelationEntry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SchemaEntry
// ═══════════════════════════════════════════════════════════════════════════════

/// A registered schema entry: rule or relation.
#[derive(Debug)]
pub enum SchemaEntry<F> {
    /// A leaf comparison.
    Rule(RuleEntry<F>),
    /// A nested collection.
    Relation(RelationEntry<F>),
}

impl<F> SchemaEntry<F> {
    /// The entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Rule(rule) => rule.name(),
            Self::Relation(relation) => relation.name(),
        }
    }

    /// Returns `true` if this is a rule.
    #[must_use]
    pub fn is_rule(&self) -> bool {
        matches!(self, Self::Rule(_))
    }

    /// Returns `true` if this is a relation.
    #[must_use]
    pub fn is_relation(&self) -> bool {
        matches!(self, Self::Relation(_))
    }
}

impl<F> From<RuleEntry<F>> for SchemaEntry<F> {
    fn from(rule: RuleEntry<F>) -> Self {
        Self::Rule(rule)
    }
}

impl<F> From<RelationEntry<F>> for SchemaEntry<F> {
    fn from(relation: RelationEntry<F>) -> Self {
        Self::Relation(relation)
    }
}
