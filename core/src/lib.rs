//! sift - schema-driven filter builder
//!
//! Turns an untyped, nested request payload into a validated, executable filter tree
//! according to a [`Configuration`] that declares which named rules and relations are
//! permitted, which operations each supports, and how each one is bound.
//!
//! # Architecture
//!
//! - [`Configuration`]: frozen registry of [`SchemaEntry`]s plus a [`Strategy`] and a
//!   [`Translator`]. Owns the entry point, [`Configuration::build_filter`].
//! - [`builder`]: recursive validator. Collects every error into an [`ErrorSink`]
//!   instead of stopping at the first one.
//! - [`Strategy`]: binds validated group nodes; rules and relations are bound by
//!   closures registered with the schema.
//! - [`ObjectStrategy`]: reference strategy evaluating [`ObjectFilter`]s against
//!   in-memory objects.
//!
//! # Key Invariants
//!
//! 1. **All errors at once**: a failed build reports every problem in the payload, in
//!    discovery order, never deduplicated.
//! 2. **Valid groups always bind**: children that fail validation are dropped, their
//!    parent group is still built.
//! 3. **None → false**: an accessor returning [`FieldValue::None`] never satisfies a rule.
//! 4. **Bounded depth**: nesting beyond [`Configuration::max_depth`] is an error, not a
//!    stack overflow.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sift::prelude::*;
//!
//! #[derive(Debug)]
//! struct Person { age: i64 }
//!
//! let config = Configuration::builder(ObjectStrategy::<Person>::new())
//!     .register_rule(
//!         "age",
//!         ConstraintType::Number,
//!         [Operation::GreaterThan, Operation::LessThan],
//!         ObjectStrategy::rule(|p: &Person| p.age.into()),
//!     )
//!     .unwrap()
//!     .build();
//!
//! let adult = config
//!     .build_filter(&json!({
//!         "type": "group",
//!         "operation": "and",
//!         "children": [{ "name": "age", "operation": "greater_than", "value": 17 }]
//!     }))
//!     .unwrap();
//! assert!(adult.adheres(&Person { age: 30 }));
//! assert!(!adult.adheres(&Person { age: 12 }));
//!
//! let err = config
//!     .build_filter(&json!({
//!         "type": "group",
//!         "operation": "and",
//!         "children": [
//!             { "name": "age", "operation": "equals", "value": "thirty" },
//!             { "name": "height", "operation": "less_than", "value": 2 }
//!         ]
//!     }))
//!     .unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Operation is not supported for 'age'. Invalid value for 'age'. \
//!      Configuration doesn't contain an entry with name 'height'."
//! );
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

pub mod builder;

mod configuration;
mod entry;
mod error;
mod object;
mod operation;
mod sink;
mod strategy;
mod translation;
mod value;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Schema
pub use configuration::{Configuration, ConfigurationBuilder};
pub use entry::{RelationEntry, RuleEntry, SchemaEntry};

// Variants and values
pub use operation::{ConstraintType, GroupType, Operation, ParseTokenError};
pub use value::{scalar_list, FieldValue, RuleValue, Scalar};

// Strategies
pub use object::{ObjectFilter, ObjectStrategy};
pub use strategy::{BoundFilter, Strategy};

// Errors and messages
pub use error::{ErrorCode, FieldErrorCode, FilterError, ValidationErrors};
pub use sink::{ErrorSink, FieldSink};
pub use translation::{Dutch, English, Locale, Translator};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use sift::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Traits
        BoundFilter,
        // Schema
        Configuration,
        ConstraintType,
        // Errors
        ErrorSink,
        FieldValue,
        FilterError,
        GroupType,
        Locale,
        // Strategies
        ObjectFilter,
        ObjectStrategy,
        Operation,
        RuleValue,
        Scalar,
        Strategy,
        Translator,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Default maximum nesting depth of groups and relations.
///
/// The root group is depth 1. Override per configuration with
/// [`ConfigurationBuilder::max_depth`].
pub const MAX_DEPTH: usize = 32;
