//! Localization of validation errors.
//!
//! A [`Translator`] turns abstract error codes into human-readable messages. The
//! translator is chosen when a [`Configuration`](crate::Configuration) is built and
//! stays fixed for its lifetime. Two locales ship: [`English`] (the default) and
//! [`Dutch`].

use std::fmt::Debug;

use crate::{ErrorCode, FieldErrorCode};

/// Maps error codes to localized messages.
///
/// # Example
///
/// ```
/// use sift::{English, ErrorCode, FieldErrorCode, Translator};
///
/// assert_eq!(English.translate_error(ErrorCode::InvalidGroup), "Invalid group");
/// assert_eq!(
///     English.translate_field_error(FieldErrorCode::InvalidValue, "age"),
///     "Invalid value for 'age'"
/// );
/// ```
pub trait Translator: Send + Sync + Debug {
    /// Message for an error without a field.
    fn translate_error(&self, error: ErrorCode) -> String;

    /// Message for an error concerning the schema entry `field`.
    fn translate_field_error(&self, error: FieldErrorCode, field: &str) -> String;
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate_error(&self, error: ErrorCode) -> String {
        (**self).translate_error(error)
    }

    fn translate_field_error(&self, error: FieldErrorCode, field: &str) -> String {
        (**self).translate_field_error(error, field)
    }
}

/// English messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Translator for English {
    fn translate_error(&self, error: ErrorCode) -> String {
        match error {
            ErrorCode::InvalidGroup => "Invalid group".to_owned(),
            ErrorCode::InvalidConfiguration => "Invalid configuration".to_owned(),
            ErrorCode::DepthExceeded => "Filter is nested too deeply".to_owned(),
        }
    }

    fn translate_field_error(&self, error: FieldErrorCode, field: &str) -> String {
        match error {
            FieldErrorCode::EmptyArray => format!("Field '{field}' must contain values"),
            FieldErrorCode::EmptyValue => format!("Value for '{field}' cannot be empty"),
            FieldErrorCode::EmptyRelation => "A relation must contain rules".to_owned(),
            FieldErrorCode::InvalidRule => format!("Invalid rule for field '{field}'"),
            FieldErrorCode::InvalidValue => format!("Invalid value for '{field}'"),
            FieldErrorCode::MissingConfigurationEntry => {
                format!("Configuration doesn't contain an entry with name '{field}'")
            }
            FieldErrorCode::UnsupportedOperation => {
                format!("Operation is not supported for '{field}'")
            }
            FieldErrorCode::InvalidOperation => format!("Invalid operation for '{field}'"),
        }
    }
}

/// Dutch messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dutch;

impl Translator for Dutch {
    fn translate_error(&self, error: ErrorCode) -> String {
        match error {
            ErrorCode::InvalidGroup => "Ongeldige groep".to_owned(),
            ErrorCode::InvalidConfiguration => "Ongeldige configuratie".to_owned(),
            ErrorCode::DepthExceeded => "Het filter is te diep genest".to_owned(),
        }
    }

    fn translate_field_error(&self, error: FieldErrorCode, field: &str) -> String {
        match error {
            FieldErrorCode::EmptyArray => format!("Het veld '{field}' moet waarden bevatten"),
            FieldErrorCode::EmptyValue => format!("De waarde voor '{field}' mag niet leeg zijn"),
            FieldErrorCode::EmptyRelation => "Een relatie moet regels bevatten".to_owned(),
            FieldErrorCode::InvalidRule => format!("Ongeldige regel voor '{field}'"),
            FieldErrorCode::InvalidValue => format!("Ongeldige waarde voor '{field}'"),
            FieldErrorCode::MissingConfigurationEntry => {
                format!("De configuratie bevat geen regel voor '{field}'")
            }
            FieldErrorCode::UnsupportedOperation => {
                format!("De operatie voor '{field}' wordt niet ondersteund")
            }
            FieldErrorCode::InvalidOperation => format!("Ongeldige operatie voor '{field}'"),
        }
    }
}

/// Built-in locale selector.
///
/// Deserializes from `"en"` / `"nl"` when the `serde` feature is enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Locale {
    /// [`English`].
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "en"))]
    English,
    /// [`Dutch`].
    #[cfg_attr(feature = "serde", serde(rename = "nl"))]
    Dutch,
}

impl Locale {
    /// The translator for this locale.
    #[must_use]
    pub fn translator(self) -> Box<dyn Translator> {
        match self {
            Self::English => Box::new(English),
            Self::Dutch => Box::new(Dutch),
        }
    }
}
