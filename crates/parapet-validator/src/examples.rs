//! Example groups: named bundles of parameter values that exercise one
//! variant of an operation.
//!
//! An operation's `examples` maps define the group names. Values of
//! required parameters that are single-valued (an `example`, or an
//! `examples` map with one entry) are merged into every group.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use parapet_spec_parser::Operation;

/// Name of the only group built when no parameter has named examples.
pub const DEFAULT_GROUP: &str = "default";

/// Parameter values for one run of an operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExampleGroup {
    name: String,
    operation_id: String,
    values: IndexMap<String, Value>,
}

impl ExampleGroup {
    pub fn new(
        name: impl Into<String>,
        operation_id: impl Into<String>,
        values: IndexMap<String, Value>,
    ) -> Self {
        Self {
            name: name.into(),
            operation_id: operation_id.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier of the operation this group was built from.
    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    /// Parameter name -> example value, in parameter declaration order.
    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    pub fn get(&self, parameter: &str) -> Option<&Value> {
        self.values.get(parameter)
    }

    pub fn contains(&self, parameter: &str) -> bool {
        self.values.contains_key(parameter)
    }
}

/// Builds the example groups of an operation.
pub struct ExampleGroupFactory;

impl ExampleGroupFactory {
    /// One group per distinct `examples` name, in first-seen order, or a
    /// single `default` group when no parameter has named examples.
    pub fn build_from_operation(operation: &Operation) -> Vec<ExampleGroup> {
        let shared: IndexMap<String, Value> = operation
            .parameters
            .iter()
            .filter(|p| p.required)
            .filter_map(|p| p.single_value().map(|v| (p.name.clone(), v.clone())))
            .collect();

        let mut names: Vec<&str> = Vec::new();
        for parameter in &operation.parameters {
            let Some(examples) = &parameter.examples else {
                continue;
            };
            for name in examples.keys() {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }

        if names.is_empty() {
            return vec![ExampleGroup::new(DEFAULT_GROUP, &operation.id, shared)];
        }

        names
            .into_iter()
            .map(|group_name| {
                let mut values = shared.clone();
                for parameter in &operation.parameters {
                    let named = parameter
                        .examples
                        .as_ref()
                        .and_then(|examples| examples.get(group_name));
                    if let Some(value) = named {
                        values.insert(parameter.name.clone(), value.clone());
                    }
                }
                ExampleGroup::new(group_name, &operation.id, values)
            })
            .collect()
    }
}
