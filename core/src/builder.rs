//! Builder: the recursive payload validator.
//!
//! Three mutually recursive functions walk an untyped payload against a
//! [`Configuration`], appending every problem to an [`ErrorSink`] and binding what
//! survives through the configuration's [`Strategy`] and the registered entries.
//!
//! ```text
//! make_group ──▶ make_children ──┬──▶ make_group             (type: group)
//!                                └──▶ make_for_entry ──┬──▶ rule bind
//!                                                      └──▶ make_children (child schema)
//! ```
//!
//! The functions never stop at the first error: siblings keep being validated so a
//! caller sees every problem at once. A node that fails its own checks is dropped
//! from its parent's children; the parent is still bound.
//!
//! # Depth
//!
//! Every function takes the nesting depth of the *parent* node (`0` above the root
//! group). Group and relation nodes count one level each. A node that would exceed
//! the owning configuration's [`max_depth`](Configuration::max_depth) reports
//! [`ErrorCode::DepthExceeded`] and is not descended into.

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::{
    scalar_list, Configuration, ConstraintType, ErrorCode, ErrorSink, FieldErrorCode,
    GroupType, Operation, RelationEntry, RuleEntry, RuleValue, Scalar, SchemaEntry, Strategy,
};

const TYPE: &str = "type";
const GROUP: &str = "group";
const NAME: &str = "name";
const OPERATION: &str = "operation";
const VALUE: &str = "value";
const CHILDREN: &str = "children";

// ═══════════════════════════════════════════════════════════════════════════════
// Children
// ═══════════════════════════════════════════════════════════════════════════════

/// Build every element of a `children` list.
///
/// Non-map elements and maps that are neither a group nor a named node are skipped
/// without an error. An unknown name reports
/// [`FieldErrorCode::MissingConfigurationEntry`]. Failed elements are left out;
/// the order of the rest is preserved.
pub fn make_children<S: Strategy>(
    config: &Configuration<S>,
    payload: &[Value],
    sink: &mut ErrorSink,
    depth: usize,
) -> Vec<S::Filter> {
    let mut children = Vec::with_capacity(payload.len());

    for node in payload {
        let Some(map) = node.as_object() else {
            trace!(depth, "skipping non-map child");
            continue;
        };

        let filter = if map.get(TYPE).and_then(Value::as_str) == Some(GROUP) {
            make_group(config, node, sink, depth)
        } else if let Some(name) = map.get(NAME).and_then(Value::as_str) {
            match config.lookup(name) {
                Ok(entry) => make_for_entry(config, entry, node, sink, depth),
                Err(_) => {
                    config.fail_field(sink, FieldErrorCode::MissingConfigurationEntry, name);
                    None
                }
            }
        } else {
            trace!(depth, "skipping child without type or name");
            continue;
        };

        match filter {
            Some(filter) => children.push(filter),
            None => debug!(depth, "dropping child that failed validation"),
        }
    }

    children
}

// ═══════════════════════════════════════════════════════════════════════════════
// Groups
// ═══════════════════════════════════════════════════════════════════════════════

/// Build a group node.
///
/// The node must be a map with `type: "group"`, an `and`/`or` `operation`, and a
/// `children` list. Anything else reports a single [`ErrorCode::InvalidGroup`] and
/// returns `None` without looking at the children. A valid group is always bound,
/// even if some (or all) of its children were dropped.
pub fn make_group<S: Strategy>(
    config: &Configuration<S>,
    payload: &Value,
    sink: &mut ErrorSink,
    depth: usize,
) -> Option<S::Filter> {
    let Some((operation, children)) = group_shape(payload) else {
        config.fail(sink, ErrorCode::InvalidGroup);
        return None;
    };
    let Ok(group) = operation.parse::<GroupType>() else {
        config.fail(sink, ErrorCode::InvalidGroup);
        return None;
    };

    let depth = enter(config, sink, depth)?;
    trace!(%group, depth, children = children.len(), "building group");

    let children = make_children(config, children, sink, depth);
    Some(config.strategy().make_group(group, children))
}

fn group_shape(payload: &Value) -> Option<(&str, &[Value])> {
    let map = payload.as_object()?;
    if map.get(TYPE)?.as_str()? != GROUP {
        return None;
    }
    let operation = map.get(OPERATION)?.as_str()?;
    let children = map.get(CHILDREN)?.as_array()?;
    Some((operation, children.as_slice()))
}

/// Step one level down, or report [`ErrorCode::DepthExceeded`].
fn enter<S: Strategy>(
    config: &Configuration<S>,
    sink: &mut ErrorSink,
    depth: usize,
) -> Option<usize> {
    let depth = depth + 1;
    if depth > config.max_depth() {
        warn!(depth, max_depth = config.max_depth(), "filter nesting limit exceeded");
        config.fail(sink, ErrorCode::DepthExceeded);
        return None;
    }
    Some(depth)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Entries
// ═══════════════════════════════════════════════════════════════════════════════

/// Build a named node against its schema entry.
pub fn make_for_entry<S: Strategy>(
    config: &Configuration<S>,
    entry: &SchemaEntry<S::Filter>,
    payload: &Value,
    sink: &mut ErrorSink,
    depth: usize,
) -> Option<S::Filter> {
    match entry {
        SchemaEntry::Rule(rule) => make_rule(config, rule, payload, sink),
        SchemaEntry::Relation(relation) => make_relation(config, relation, payload, sink, depth),
    }
}

fn make_rule<S: Strategy>(
    config: &Configuration<S>,
    rule: &RuleEntry<S::Filter>,
    payload: &Value,
    sink: &mut ErrorSink,
) -> Option<S::Filter> {
    let field = rule.name();

    let (Some(operation), Some(value)) = (
        payload.get(OPERATION).and_then(Value::as_str),
        payload.get(VALUE),
    ) else {
        config.fail_field(sink, FieldErrorCode::InvalidRule, field);
        return None;
    };
    let Ok(operation) = operation.parse::<Operation>() else {
        config.fail_field(sink, FieldErrorCode::InvalidOperation, field);
        return None;
    };
    trace!(field, %operation, "building rule");

    // These checks report but do not stop the bind below.
    if !rule.supports(operation) {
        config.fail_field(sink, FieldErrorCode::UnsupportedOperation, field);
    }
    rule.validate(value, sink, config.translator());
    if value.is_null() {
        config.fail_field(sink, FieldErrorCode::EmptyValue, field);
    }

    let bound = match (rule.constraint(), operation) {
        (constraint, Operation::OneOf) => match scalar_list(value) {
            Some(items) if items.is_empty() && constraint == ConstraintType::Dropdown => {
                config.fail_field(sink, FieldErrorCode::EmptyArray, field);
                return None;
            }
            Some(items) => Some(RuleValue::List(items)),
            None => None,
        },
        (ConstraintType::String, _) => value
            .as_str()
            .map(|s| RuleValue::Scalar(Scalar::String(s.to_owned()))),
        (ConstraintType::Number, _) => Scalar::from_json(value)
            .filter(Scalar::is_number)
            .map(RuleValue::Scalar),
        (ConstraintType::Dropdown, _) => Scalar::from_json(value).map(RuleValue::Scalar),
    };

    let Some(value) = bound else {
        config.fail_field(sink, FieldErrorCode::InvalidValue, field);
        return None;
    };
    Some(rule.bind(operation, value))
}

fn make_relation<S: Strategy>(
    config: &Configuration<S>,
    relation: &RelationEntry<S::Filter>,
    payload: &Value,
    sink: &mut ErrorSink,
    depth: usize,
) -> Option<S::Filter> {
    let field = relation.name();

    let (Some(operation), Some(children)) = (
        payload.get(OPERATION).and_then(Value::as_str),
        payload.get(CHILDREN).and_then(Value::as_array),
    ) else {
        config.fail_field(sink, FieldErrorCode::InvalidRule, field);
        return None;
    };
    let Ok(group) = operation.parse::<GroupType>() else {
        config.fail_field(sink, FieldErrorCode::InvalidOperation, field);
        return None;
    };
    if children.is_empty() {
        config.fail_field(sink, FieldErrorCode::EmptyRelation, field);
        return None;
    }

    let depth = enter(config, sink, depth)?;
    trace!(field, %group, depth, "building relation");

    Some(relation.resolve(group, children, sink, depth))
}
