//! Error taxonomy.
//!
//! Two tiers:
//!
//! - **Validation errors** are abstract codes ([`ErrorCode`], [`FieldErrorCode`])
//!   localized by a [`Translator`](crate::Translator) and accumulated in an
//!   [`ErrorSink`](crate::ErrorSink). A failed build reports all of them at once via
//!   [`FilterError::Validation`].
//! - **Construction errors** (bad schema declaration, direct lookup of an unknown
//!   entry) are returned immediately as the other [`FilterError`] variants. A failed
//!   lookup carries the configuration's localized message.

use std::fmt;

use crate::{ConstraintType, Operation};

/// Error codes that carry no field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The builder produced nothing and reported nothing.
    InvalidConfiguration,
    /// A group node is malformed or names an unknown combinator.
    InvalidGroup,
    /// Group/relation nesting exceeds the configured maximum depth.
    DepthExceeded,
}

/// Error codes qualified by the name of the schema entry they concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldErrorCode {
    /// A dropdown `one_of` list is empty.
    EmptyArray,
    /// A relation node has no children.
    EmptyRelation,
    /// A rule value is `null`.
    EmptyValue,
    /// The operation token is unknown.
    InvalidOperation,
    /// A rule or relation node lacks its required keys.
    InvalidRule,
    /// A rule value has the wrong shape for its constraint type.
    InvalidValue,
    /// No schema entry is registered under the name.
    MissingConfigurationEntry,
    /// The operation is valid but not enabled for this entry.
    UnsupportedOperation,
}

/// The ordered, localized messages of a failed build.
///
/// Displays as all messages joined by `". "` with a trailing `"."`.
///
/// ```
/// use sift::ValidationErrors;
///
/// let errors = ValidationErrors::new(vec!["Invalid group".into(), "Invalid value for 'age'".into()]);
/// assert_eq!(errors.to_string(), "Invalid group. Invalid value for 'age'.");
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    /// Wrap a list of localized messages.
    #[must_use]
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    /// The messages in discovery order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if there are no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate over the messages.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.messages.iter()
    }

    /// Take ownership of the messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.", self.messages.join(". "))
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Errors returned by schema construction and [`Configuration::build_filter`](crate::Configuration::build_filter).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// The payload failed validation. Carries every localized message.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// The builder returned no filter without recording an error.
    #[error("{message}")]
    InvalidConfiguration {
        /// Localized message.
        message: String,
    },

    /// No schema entry is registered under `name`.
    #[error("{message}")]
    MissingEntry {
        /// The requested entry name.
        name: String,
        /// Localized message.
        message: String,
    },

    /// A rule was declared with an operation its constraint type does not permit.
    #[error("operation \"{operation}\" is not permitted for {constraint} rule \"{name}\"")]
    UnsupportedOperation {
        /// The rule name.
        name: String,
        /// The offending operation.
        operation: Operation,
        /// The rule's constraint type.
        constraint: ConstraintType,
    },
}

impl FilterError {
    /// The localized validation messages, if this is a validation failure.
    #[must_use]
    pub fn validation_messages(&self) -> Option<&[String]> {
        match self {
            Self::Validation(errors) => Some(errors.messages()),
            _ => None,
        }
    }
}
