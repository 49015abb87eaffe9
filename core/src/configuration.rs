//! Configuration: the schema a payload is validated against.
//!
//! A [`Configuration`] owns the registered [`SchemaEntry`]s, the [`Strategy`] that binds
//! groups, and the [`Translator`] used for every message it reports.
//!
//! # Lifecycle
//!
//! Built once through [`ConfigurationBuilder`], then immutable. No registration is
//! possible after [`build()`](ConfigurationBuilder::build); the frozen configuration
//! is `Send + Sync` and can serve any number of concurrent [`build_filter`] calls.
//!
//! [`build_filter`]: Configuration::build_filter
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sift::prelude::*;
//!
//! #[derive(Debug)]
//! struct User { status: String }
//!
//! let config = Configuration::builder(ObjectStrategy::<User>::new())
//!     .register_rule(
//!         "status",
//!         ConstraintType::String,
//!         [Operation::Equals],
//!         ObjectStrategy::rule(|u: &User| u.status.as_str().into()),
//!     )
//!     .unwrap()
//!     .build();
//!
//! let filter = config
//!     .build_filter(&json!({
//!         "type": "group",
//!         "operation": "and",
//!         "children": [{ "name": "status", "operation": "equals", "value": "active" }]
//!     }))
//!     .unwrap();
//!
//! assert!(filter.adheres(&User { status: "active".into() }));
//! assert!(!filter.adheres(&User { status: "blocked".into() }));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::builder;
use crate::{
    ConstraintType, ErrorCode, ErrorSink, FieldErrorCode, FieldSink, FilterError, GroupType, Locale,
    Operation, RelationEntry, RuleEntry, RuleValue, SchemaEntry, Strategy, Translator,
    ValidationErrors, MAX_DEPTH,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Builder
// ═══════════════════════════════════════════════════════════════════════════════

/// Builder for a [`Configuration`].
///
/// Registering a name twice replaces the earlier entry.
pub struct ConfigurationBuilder<S: Strategy> {
    entries: HashMap<String, SchemaEntry<S::Filter>>,
    strategy: S,
    translator: Box<dyn Translator>,
    max_depth: usize,
}

impl<S: Strategy> ConfigurationBuilder<S> {
    /// Create an empty builder with English messages and the default [`MAX_DEPTH`].
    #[must_use]
    pub fn new(strategy: S) -> Self {
        Self {
            entries: HashMap::new(),
            strategy,
            translator: Locale::default().translator(),
            max_depth: MAX_DEPTH,
        }
    }

    /// Register a rule.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnsupportedOperation`] if any of `operations` is not
    /// permitted by `constraint`.
    pub fn register_rule<B>(
        self,
        name: impl Into<String>,
        constraint: ConstraintType,
        operations: impl IntoIterator<Item = Operation>,
        bind: B,
    ) -> Result<Self, FilterError>
    where
        B: Fn(Operation, RuleValue) -> S::Filter + Send + Sync + 'static,
    {
        let rule = RuleEntry::new(name, constraint, operations, bind)?;
        Ok(self.entry(rule))
    }

    /// Register a rule with an extra-validation callback.
    ///
    /// See [`RuleEntry::with_validation`].
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnsupportedOperation`] if any of `operations` is not
    /// permitted by `constraint`.
    pub fn register_rule_with_validation<B, V>(
        self,
        name: impl Into<String>,
        constraint: ConstraintType,
        operations: impl IntoIterator<Item = Operation>,
        bind: B,
        validation: V,
    ) -> Result<Self, FilterError>
    where
        B: Fn(Operation, RuleValue) -> S::Filter + Send + Sync + 'static,
        V: Fn(&Value, &mut FieldSink<'_>) + Send + Sync + 'static,
    {
        let rule = RuleEntry::new(name, constraint, operations, bind)?.with_validation(validation);
        Ok(self.entry(rule))
    }

    /// Register a relation to entities governed by `child`.
    #[must_use]
    pub fn register_relation<C, B>(
        self,
        name: impl Into<String>,
        bind: B,
        child: Arc<Configuration<C>>,
    ) -> Self
    where
        S::Filter: 'static,
        C: Strategy + 'static,
        C::Filter: 'static,
        B: Fn(GroupType, Vec<C::Filter>) -> S::Filter + Send + Sync + 'static,
    {
        self.entry(RelationEntry::new(name, bind, child))
    }

    /// Register a pre-built entry.
    #[must_use]
    pub fn entry(mut self, entry: impl Into<SchemaEntry<S::Filter>>) -> Self {
        let entry: SchemaEntry<S::Filter> = entry.into();
        let name = entry.name().to_owned();
        trace!(name = %name, relation = entry.is_relation(), "registering schema entry");
        if self.entries.insert(name, entry).is_some() {
            debug!("schema entry registered twice, keeping the last one");
        }
        self
    }

    /// Use a custom translator.
    #[must_use]
    pub fn translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    /// Use one of the built-in locales.
    #[must_use]
    pub fn locale(mut self, locale: Locale) -> Self {
        self.translator = locale.translator();
        self
    }

    /// Maximum group/relation nesting depth accepted by this configuration.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Freeze the configuration. No further registration is possible.
    #[must_use]
    pub fn build(self) -> Configuration<S> {
        Configuration {
            entries: self.entries,
            strategy: self.strategy,
            translator: self.translator,
            max_depth: self.max_depth,
        }
    }
}

impl<S: Strategy> fmt::Debug for ConfigurationBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationBuilder")
            .field("entries", &self.entries.len())
            .field("strategy", &self.strategy)
            .field("translator", &self.translator)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════════

/// Immutable schema: named entries, a strategy and a translator.
pub struct Configuration<S: Strategy> {
    entries: HashMap<String, SchemaEntry<S::Filter>>,
    strategy: S,
    translator: Box<dyn Translator>,
    max_depth: usize,
}

impl<S: Strategy> Configuration<S> {
    /// Start building a configuration around `strategy`.
    #[must_use]
    pub fn builder(strategy: S) -> ConfigurationBuilder<S> {
        ConfigurationBuilder::new(strategy)
    }

    /// Turn `payload` into a bound filter.
    ///
    /// The payload root must be a group node. Every validation error in the whole
    /// payload is collected before failing.
    ///
    /// # Errors
    ///
    /// - [`FilterError::Validation`]: one or more validation errors, in discovery order
    /// - [`FilterError::InvalidConfiguration`]: nothing was built and nothing reported
    pub fn build_filter(&self, payload: &Value) -> Result<S::Filter, FilterError> {
        let mut sink = ErrorSink::new();
        let filter = builder::make_group(self, payload, &mut sink, 0);

        if !sink.is_empty() {
            debug!(errors = sink.len(), "payload failed validation");
            return Err(FilterError::Validation(ValidationErrors::new(
                sink.into_messages(),
            )));
        }

        filter.ok_or_else(|| FilterError::InvalidConfiguration {
            message: self.translator.translate_error(ErrorCode::InvalidConfiguration),
        })
    }

    /// Look up an entry by name.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MissingEntry`] if no entry is registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<&SchemaEntry<S::Filter>, FilterError> {
        self.entries
            .get(name)
            .ok_or_else(|| FilterError::MissingEntry {
                name: name.to_owned(),
                message: self
                    .translator
                    .translate_field_error(FieldErrorCode::MissingConfigurationEntry, name),
            })
    }

    /// Returns `true` if an entry is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered entry names (sorted).
    #[must_use]
    pub fn entry_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The strategy binding groups.
    #[must_use]
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// The translator localizing messages.
    #[must_use]
    pub fn translator(&self) -> &dyn Translator {
        &*self.translator
    }

    /// Maximum group/relation nesting depth.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub(crate) fn fail(&self, sink: &mut ErrorSink, error: ErrorCode) {
        sink.fail(self.translator.translate_error(error));
    }

    pub(crate) fn fail_field(&self, sink: &mut ErrorSink, error: FieldErrorCode, field: &str) {
        sink.fail(self.translator.translate_field_error(error, field));
    }
}

impl<S: Strategy> fmt::Debug for Configuration<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("entries", &self.entry_names())
            .field("strategy", &self.strategy)
            .field("translator", &self.translator)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
