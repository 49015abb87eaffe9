//! Fixed variant sets: comparison operations, group combinators, constraint types.
//!
//! Every variant has a stable wire token used in payloads (`"equals"`, `"and"`, ...).
//! Parsing goes through [`FromStr`]; unknown tokens yield [`ParseTokenError`].

use std::fmt;
use std::str::FromStr;

/// A token in the payload did not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} \"{token}\"")]
pub struct ParseTokenError {
    /// What was being parsed (`"operation"`, `"group type"`, `"constraint type"`).
    pub kind: &'static str,
    /// The rejected token.
    pub token: String,
}

impl ParseTokenError {
    fn new(kind: &'static str, token: &str) -> Self {
        Self {
            kind,
            token: token.to_owned(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Operation
// ═══════════════════════════════════════════════════════════════════════════════

/// Comparison operation carried by a rule node.
///
/// ```
/// use sift::Operation;
///
/// let op: Operation = "starts_with".parse().unwrap();
/// assert_eq!(op, Operation::StartsWith);
/// assert_eq!(op.as_str(), "starts_with");
/// assert!("contains".parse::<Operation>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Operation {
    /// Strict equality.
    Equals,
    /// String prefix test.
    StartsWith,
    /// Ordered comparison, strictly smaller.
    LessThan,
    /// Ordered comparison, strictly greater.
    GreaterThan,
    /// Strict-typed membership in a list.
    OneOf,
}

impl Operation {
    /// All operations, in declaration order.
    pub const ALL: [Operation; 5] = [
        Operation::Equals,
        Operation::StartsWith,
        Operation::LessThan,
        Operation::GreaterThan,
        Operation::OneOf,
    ];

    /// The wire token for this operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::StartsWith => "starts_with",
            Self::LessThan => "less_than",
            Self::GreaterThan => "greater_than",
            Self::OneOf => "one_of",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ParseTokenError::new("operation", s))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// GroupType
// ═══════════════════════════════════════════════════════════════════════════════

/// Combinator for group and relation nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GroupType {
    /// Every child must pass.
    And,
    /// At least one child must pass.
    Or,
}

impl GroupType {
    /// The wire token for this combinator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupType {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            other => Err(ParseTokenError::new("group type", other)),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ConstraintType
// ═══════════════════════════════════════════════════════════════════════════════

/// The scalar kind a rule holds. Each kind permits a fixed subset of [`Operation`]s.
///
/// ```
/// use sift::{ConstraintType, Operation};
///
/// assert!(ConstraintType::Number.permits(Operation::GreaterThan));
/// assert!(!ConstraintType::Dropdown.permits(Operation::StartsWith));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConstraintType {
    /// Free text.
    String,
    /// Integer or floating point.
    Number,
    /// A value picked from a fixed set (string or number).
    Dropdown,
}

impl ConstraintType {
    /// Operations this constraint type permits.
    #[must_use]
    pub const fn operations(self) -> &'static [Operation] {
        match self {
            Self::String => &[Operation::Equals, Operation::StartsWith, Operation::OneOf],
            Self::Number => &[
                Operation::Equals,
                Operation::GreaterThan,
                Operation::LessThan,
                Operation::OneOf,
            ],
            Self::Dropdown => &[Operation::Equals, Operation::OneOf],
        }
    }

    /// Returns `true` if `operation` is permitted for this constraint type.
    #[must_use]
    pub fn permits(self, operation: Operation) -> bool {
        self.operations().contains(&operation)
    }

    /// The wire token for this constraint type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Dropdown => "dropdown",
        }
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintType {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "dropdown" => Ok(Self::Dropdown),
            other => Err(ParseTokenError::new("constraint type", other)),
        }
    }
}
