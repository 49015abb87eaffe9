//! Append-only collector for validation messages.

use crate::{FieldErrorCode, Translator};

/// Collects localized validation messages in discovery order.
///
/// Threaded through the builder as `&mut ErrorSink`; sibling nodes keep being
/// validated after a failure. A rule's extra-validation callback reaches it through
/// a [`FieldSink`].
///
/// ```
/// use sift::ErrorSink;
///
/// let mut sink = ErrorSink::new();
/// sink.fail("Postcode must have four digits");
/// assert_eq!(sink.len(), 1);
/// assert_eq!(sink.messages(), ["Postcode must have four digits"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSink {
    messages: Vec<String>,
}

impl ErrorSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message. Messages are never deduplicated.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Number of recorded messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The recorded messages.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Take ownership of the recorded messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

/// An [`ErrorSink`] bound to one rule, handed to its extra-validation callback.
///
/// Plain messages are recorded as given; field codes are localized with the
/// configuration's translator and the rule's name.
///
/// ```
/// use sift::{English, ErrorSink, FieldErrorCode, FieldSink};
///
/// let mut sink = ErrorSink::new();
/// let mut field = FieldSink::new(&mut sink, &English, "zip");
/// field.fail_field(FieldErrorCode::InvalidValue);
/// field.fail("Postcode must have four digits");
/// assert_eq!(sink.messages(), ["Invalid value for 'zip'", "Postcode must have four digits"]);
/// ```
pub struct FieldSink<'a> {
    sink: &'a mut ErrorSink,
    translator: &'a dyn Translator,
    field: &'a str,
}

impl<'a> FieldSink<'a> {
    /// Bind `sink` to the rule named `field`.
    pub fn new(sink: &'a mut ErrorSink, translator: &'a dyn Translator, field: &'a str) -> Self {
        Self {
            sink,
            translator,
            field,
        }
    }

    /// The name of the rule being validated.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field
    }

    /// Record a message as given.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.sink.fail(message);
    }

    /// Record a field code, localized for this rule.
    pub fn fail_field(&mut self, error: FieldErrorCode) {
        self.sink
            .fail(self.translator.translate_field_error(error, self.field));
    }
}

impl std::fmt::Debug for FieldSink<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSink")
            .field("field", &self.field)
            .field("recorded", &self.sink.len())
            .finish_non_exhaustive()
    }
}
