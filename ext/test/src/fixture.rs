//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against the sift builder.
//!
//! A fixture declares a schema and a payload, then either the exact error list the
//! build must produce or a set of records with the expected evaluation result:
//!
//! ```yaml
//! name: adults
//! description: greater_than on a number rule
//! schema:
//!   rules:
//!     - { name: age, type: number, operations: [greater_than] }
//! payload:
//!   type: group
//!   operation: and
//!   children:
//!     - { name: age, operation: greater_than, value: 18 }
//! cases:
//!   - { name: adult, record: { age: 30 }, expect: true }
//!   - { name: minor, record: { age: 12 }, expect: false }
//! ```

use serde::Deserialize;
use serde_json::Value;
use sift::prelude::*;

use crate::schema::SchemaDecl;
use crate::TestRecord;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    pub description: String,
    pub schema: SchemaDecl,
    pub payload: Value,
    /// When present, the build must fail with exactly these messages, in order.
    #[serde(default)]
    pub expect_errors: Option<Vec<String>>,
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    #[serde(default)]
    pub record: Value,
    pub expect: bool,
}

impl TestCase {
    /// Build a TestRecord from this case's record map
    pub fn build_record(&self) -> TestRecord {
        TestRecord::from_json(&self.record)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: bool,
    pub actual: bool,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Declare the schema and build the payload
    pub fn build(&self) -> Result<ObjectFilter<TestRecord>, FilterError> {
        self.schema.build()?.build_filter(&self.payload)
    }

    /// Build the payload, then run all test cases and return results
    pub fn run(&self) -> Result<Vec<CaseResult>, FilterError> {
        let filter = self.build()?;
        Ok(self
            .cases
            .iter()
            .map(|case| {
                let actual = filter.adheres(&case.build_record());
                CaseResult {
                    case_name: case.name.clone(),
                    passed: actual == case.expect,
                    expected: case.expect,
                    actual,
                }
            })
            .collect())
    }

    /// Run the fixture and panic on first failure
    pub fn run_and_assert(&self) {
        if let Some(expected) = &self.expect_errors {
            let actual = match self.build() {
                Ok(filter) => panic!(
                    "Fixture '{}' expected errors {:?}, got filter {:?}",
                    self.name, expected, filter
                ),
                Err(FilterError::Validation(errors)) => errors.into_messages(),
                Err(other) => vec![other.to_string()],
            };
            assert_eq!(
                &actual, expected,
                "Fixture '{}' produced unexpected errors",
                self.name
            );
            return;
        }

        let results = self
            .run()
            .unwrap_or_else(|e| panic!("Fixture '{}' failed to build: {e}", self.name));
        for result in results {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {}, got {}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r"
name: adults
description: greater_than on a number rule
schema:
  rules:
    - { name: age, type: number, operations: [greater_than] }
payload:
  type: group
  operation: and
  children:
    - { name: age, operation: greater_than, value: 18 }
cases:
  - { name: adult, record: { age: 30 }, expect: true }
  - { name: minor, record: { age: 12 }, expect: false }
  - { name: missing, expect: false }
";

    #[test]
    fn test_run_cases() {
        let fixture = Fixture::from_yaml(FIXTURE).unwrap();
        let results = fixture.run().unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.passed), "{results:?}");
    }

    #[test]
    fn test_expected_errors() {
        let fixture = Fixture::from_yaml(
            r"
name: bad
description: unknown entry
schema: {}
payload:
  type: group
  operation: or
  children:
    - { name: age, operation: equals, value: 1 }
expect_errors:
  - Configuration doesn't contain an entry with name 'age'
",
        )
        .unwrap();
        fixture.run_and_assert();
        assert!(fixture.run().is_err());
    }

    #[test]
    fn test_multi_document() {
        let yaml = format!("{FIXTURE}---{FIXTURE}");
        assert_eq!(Fixture::from_yaml_multi(&yaml).unwrap().len(), 2);
    }
}
