//! sift-test: Test domain for conformance testing
//!
//! Provides a loosely-typed record and bind helpers that read it by field name, so
//! schemas can be declared from data instead of code.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sift_test::prelude::*;
//!
//! let config = Configuration::builder(ObjectStrategy::<TestRecord>::new())
//!     .register_rule("role", ConstraintType::Dropdown, [Operation::Equals], field("role"))
//!     .unwrap()
//!     .build();
//!
//! let filter = config
//!     .build_filter(&json!({
//!         "type": "group",
//!         "operation": "and",
//!         "children": [{ "name": "role", "operation": "equals", "value": "admin" }]
//!     }))
//!     .unwrap();
//!
//! assert!(filter.adheres(&TestRecord::new().with("role", "admin")));
//! assert!(!filter.adheres(&TestRecord::new().with("role", "guest")));
//! ```

use std::collections::HashMap;

use serde_json::Value;
use sift::prelude::*;

#[cfg(feature = "fixtures")]
pub mod fixture;
#[cfg(feature = "fixtures")]
pub mod schema;

/// Test record: named scalar fields plus named related collections.
///
/// Used for conformance testing where we need predictable,
/// controllable input data.
#[derive(Debug, Clone, Default)]
pub struct TestRecord {
    fields: HashMap<String, FieldValue>,
    related: HashMap<String, Vec<TestRecord>>,
}

impl TestRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Set a related collection (builder pattern).
    #[must_use]
    pub fn with_related(mut self, key: impl Into<String>, records: Vec<TestRecord>) -> Self {
        self.related.insert(key.into(), records);
        self
    }

    /// Read a field. Missing fields read as [`FieldValue::None`].
    #[must_use]
    pub fn field(&self, key: &str) -> FieldValue {
        self.fields.get(key).cloned().unwrap_or_default()
    }

    /// Read a related collection. Missing collections read as empty.
    #[must_use]
    pub fn related(&self, key: &str) -> &[TestRecord] {
        self.related.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Build a record from a JSON object.
    ///
    /// Strings and numbers become fields, arrays of objects become related
    /// collections. Everything else (`null`, booleans, nested objects) is left out,
    /// so it reads as missing.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let mut record = Self::new();
        let Some(map) = value.as_object() else {
            return record;
        };
        for (key, value) in map {
            if let Some(scalar) = Scalar::from_json(value) {
                record.fields.insert(key.clone(), scalar.into());
            } else if let Some(items) = value.as_array() {
                let related = items.iter().map(Self::from_json).collect();
                record.related.insert(key.clone(), related);
            }
        }
        record
    }
}

/// Rule bind function reading the [`TestRecord`] field `name`.
pub fn field(
    name: impl Into<String>,
) -> impl Fn(Operation, RuleValue) -> ObjectFilter<TestRecord> + Send + Sync + 'static {
    let name = name.into();
    ObjectStrategy::rule(move |record: &TestRecord| record.field(&name))
}

/// Relation bind function reading the [`TestRecord`] collection `name`.
pub fn related(
    name: impl Into<String>,
) -> impl Fn(GroupType, Vec<ObjectFilter<TestRecord>>) -> ObjectFilter<TestRecord> + Send + Sync + 'static
{
    let name = name.into();
    ObjectStrategy::relation(move |record: &TestRecord| record.related(&name))
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{field, related, TestRecord};
    pub use sift::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_record_builder() {
        let record = TestRecord::new()
            .with("name", "alice")
            .with("age", 31i64)
            .with_related("pets", vec![TestRecord::new().with("species", "cat")]);

        assert_eq!(record.field("name"), FieldValue::from("alice"));
        assert_eq!(record.field("age"), FieldValue::Int(31));
        assert!(record.field("missing").is_none());
        assert_eq!(record.related("pets").len(), 1);
        assert!(record.related("cars").is_empty());
    }

    #[test]
    fn test_record_from_json() {
        let record = TestRecord::from_json(&json!({
            "name": "bob",
            "score": 1.5,
            "active": true,
            "nickname": null,
            "orders": [{ "total": 10 }, { "total": 20 }]
        }));

        assert_eq!(record.field("name"), FieldValue::from("bob"));
        assert_eq!(record.field("score"), FieldValue::Float(1.5));
        assert!(record.field("active").is_none());
        assert!(record.field("nickname").is_none());
        assert_eq!(record.related("orders")[1].field("total"), FieldValue::Int(20));
    }

    #[test]
    fn test_field_and_related_helpers() {
        let orders = Configuration::builder(ObjectStrategy::<TestRecord>::new())
            .register_rule("total", ConstraintType::Number, [Operation::GreaterThan], field("total"))
            .unwrap()
            .build();
        let config = Configuration::builder(ObjectStrategy::<TestRecord>::new())
            .register_relation("orders", related("orders"), Arc::new(orders))
            .build();

        let filter = config
            .build_filter(&json!({
                "type": "group",
                "operation": "and",
                "children": [{ "name": "orders", "operation": "and", "children": [
                    { "name": "total", "operation": "greater_than", "value": 15 }
                ]}]
            }))
            .unwrap();

        let big = TestRecord::new().with_related(
            "orders",
            vec![TestRecord::new().with("total", 5i64), TestRecord::new().with("total", 25i64)],
        );
        let small = TestRecord::new().with_related("orders", vec![TestRecord::new().with("total", 5i64)]);
        assert!(filter.adheres(&big));
        assert!(!filter.adheres(&small));
        assert!(!filter.adheres(&TestRecord::new()));
    }
}
