//! Values flowing through a filter.
//!
//! Two directions, two types:
//!
//! - [`RuleValue`]: what a payload rule node carries after validation (a [`Scalar`]
//!   or a list of them). Handed to the rule's bind function.
//! - [`FieldValue`]: what an accessor reads from a target object at evaluation
//!   time. Has a `None` variant for "no data".
//!
//! # INV: None → false
//!
//! A rule whose accessor yields [`FieldValue::None`] never passes, whatever the
//! operation. Comparisons between mismatched kinds are `false` as well, except
//! `Int`/`Float` ordering, which compares numerically.

use std::cmp::Ordering;

use serde_json::Value;

/// A primitive payload value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Text.
    String(String),
    /// A JSON number representable as `i64`.
    Int(i64),
    /// Any other JSON number.
    Float(f64),
}

impl Scalar {
    /// Convert a JSON value into a scalar.
    ///
    /// Strings and numbers convert; `null`, booleans, arrays and objects do not.
    ///
    /// ```
    /// use serde_json::json;
    /// use sift::Scalar;
    ///
    /// assert_eq!(Scalar::from_json(&json!(18)), Some(Scalar::Int(18)));
    /// assert_eq!(Scalar::from_json(&json!(1.5)), Some(Scalar::Float(1.5)));
    /// assert_eq!(Scalar::from_json(&json!(true)), None);
    /// ```
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float)),
            _ => None,
        }
    }

    /// Returns `true` for `Int` and `Float`.
    #[inline]
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Try to get the value as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

/// Read a JSON array whose every element is a [`Scalar`].
///
/// Returns `None` if `value` is not an array or any element is not a scalar.
/// An empty array yields `Some(vec![])`.
#[must_use]
pub fn scalar_list(value: &Value) -> Option<Vec<Scalar>> {
    value.as_array()?.iter().map(Scalar::from_json).collect()
}

/// A validated rule value, as handed to a rule's bind function.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleValue {
    /// A single scalar (every operation except `one_of`).
    Scalar(Scalar),
    /// A list of scalars (`one_of`).
    List(Vec<Scalar>),
}

impl RuleValue {
    /// The single scalar, if this is not a list.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// The list, if this is one.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Self::List(items) => Some(items),
            Self::Scalar(_) => None,
        }
    }
}

impl From<Scalar> for RuleValue {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<Vec<Scalar>> for RuleValue {
    fn from(items: Vec<Scalar>) -> Self {
        Self::List(items)
    }
}

/// Data read from a target object by an accessor.
///
/// ```
/// use sift::{FieldValue, Scalar};
///
/// let age: FieldValue = 21i64.into();
/// assert!(age.equals(&Scalar::Int(21)));
/// assert!(!age.equals(&Scalar::Float(21.0))); // strict: kinds must match
/// assert!(!FieldValue::None.equals(&Scalar::Int(21)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
    /// No data available. Never satisfies a rule.
    #[default]
    None,
    /// Text.
    String(String),
    /// Integer.
    Int(i64),
    /// Floating point.
    Float(f64),
}

impl FieldValue {
    /// Returns `true` if this is the `None` variant.
    #[inline]
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Try to get the value as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Strict equality: same kind and same value.
    #[must_use]
    pub fn equals(&self, expected: &Scalar) -> bool {
        match (self, expected) {
            (Self::String(a), Scalar::String(b)) => a == b,
            (Self::Int(a), Scalar::Int(b)) => a == b,
            #[allow(clippy::float_cmp)] // strict equality is the contract
            (Self::Float(a), Scalar::Float(b)) => a == b,
            _ => false,
        }
    }

    /// Ordering of this value relative to `expected`.
    ///
    /// Strings order lexicographically; numbers order numerically across
    /// `Int`/`Float`. Any other pairing is unordered (`None`).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compare(&self, expected: &Scalar) -> Option<Ordering> {
        match (self, expected) {
            (Self::String(a), Scalar::String(b)) => Some(a.as_str().cmp(b.as_str())),
            (Self::Int(a), Scalar::Int(b)) => Some(a.cmp(b)),
            (Self::Float(a), Scalar::Float(b)) => a.partial_cmp(b),
            (Self::Int(a), Scalar::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Scalar::Int(b)) => a.partial_cmp(&(*b as f64)),
            _ => None,
        }
    }

    /// Returns a string describing the kind of this value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::String(_) => "string",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Scalar> for FieldValue {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::String(s) => Self::String(s),
            Scalar::Int(i) => Self::Int(i),
            Scalar::Float(f) => Self::Float(f),
        }
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::None, Into::into)
    }
}
