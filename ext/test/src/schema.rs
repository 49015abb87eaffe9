//! Declarative schemas for the test domain.
//!
//! A [`SchemaDecl`] names rules and relations the way a fixture would write them;
//! [`SchemaDecl::build`] registers each one against [`TestRecord`] fields of the same
//! name.
//!
//! ```yaml
//! rules:
//!   - { name: age, type: number, operations: [greater_than, less_than] }
//! relations:
//!   - name: pets
//!     schema:
//!       rules:
//!         - { name: species, type: dropdown, operations: [equals, one_of] }
//! locale: nl
//! ```

use std::sync::Arc;

use serde::Deserialize;
use sift::prelude::*;

use crate::{field, related, TestRecord};

/// A schema declaration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDecl {
    #[serde(default)]
    pub rules: Vec<RuleDecl>,
    #[serde(default)]
    pub relations: Vec<RelationDecl>,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub max_depth: Option<usize>,
}

/// A rule declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub constraint: ConstraintType,
    pub operations: Vec<Operation>,
}

/// A relation declaration with its nested schema.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationDecl {
    pub name: String,
    #[serde(default)]
    pub schema: SchemaDecl,
}

impl SchemaDecl {
    /// Parse a declaration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Register every declared entry and freeze the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnsupportedOperation`] if a rule declares an operation
    /// its type does not permit (also for nested schemas).
    pub fn build(&self) -> Result<Configuration<ObjectStrategy<TestRecord>>, FilterError> {
        let mut builder = Configuration::builder(ObjectStrategy::new()).locale(self.locale);
        if let Some(max_depth) = self.max_depth {
            builder = builder.max_depth(max_depth);
        }

        for rule in &self.rules {
            builder = builder.register_rule(
                rule.name.as_str(),
                rule.constraint,
                rule.operations.iter().copied(),
                field(rule.name.as_str()),
            )?;
        }

        for relation in &self.relations {
            let child = Arc::new(relation.schema.build()?);
            builder = builder.register_relation(
                relation.name.as_str(),
                related(relation.name.as_str()),
                child,
            );
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_yaml() {
        let decl = SchemaDecl::from_yaml(
            r"
rules:
  - { name: age, type: number, operations: [greater_than] }
  - { name: colour, type: dropdown, operations: [equals, one_of] }
relations:
  - name: pets
    schema:
      rules:
        - { name: species, type: string, operations: [starts_with] }
locale: nl
max_depth: 4
",
        )
        .unwrap();

        let config = decl.build().unwrap();
        assert_eq!(config.entry_names(), ["age", "colour", "pets"]);
        assert_eq!(config.max_depth(), 4);
        assert_eq!(
            config.translator().translate_error(sift::ErrorCode::InvalidGroup),
            "Ongeldige groep"
        );
    }

    #[test]
    fn test_nested_declaration_error_propagates() {
        let decl = SchemaDecl::from_yaml(
            r"
relations:
  - name: pets
    schema:
      rules:
        - { name: legs, type: number, operations: [starts_with] }
",
        )
        .unwrap();

        assert!(matches!(
            decl.build(),
            Err(FilterError::UnsupportedOperation { ref name, .. }) if name == "legs"
        ));
    }

    #[test]
    fn test_unknown_tokens_fail_to_parse() {
        assert!(SchemaDecl::from_yaml("rules: [{ name: a, type: date, operations: [] }]").is_err());
        assert!(SchemaDecl::from_yaml("rules: [{ name: a, type: string, operations: [contains] }]").is_err());
        assert!(SchemaDecl::from_yaml("locale: fr").is_err());
    }
}
