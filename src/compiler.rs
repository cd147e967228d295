//! Query compiler that renders a parsed `Condition` into a filter document.
//!
//! The document uses `$and` / `$or` / `$not` plus the comparison operators of
//! the catalog, keyed by resolved field paths:
//!
//! ```text
//! {"$and":[{"metadata.timestamp":{"$gt":1}},{"channels.CHANNEL_1.data":{"$lte":1}}]}
//! ```

use crate::ast::{Condition, Operand, Predicate};
use crate::config::FieldMapping;
use serde_json::{Map, Value};

/// Renders conditions using a field mapping for channel resolution.
#[derive(Debug, Clone, Default)]
pub struct QueryCompiler {
    mapping: FieldMapping,
}

impl QueryCompiler {
    pub fn new(mapping: FieldMapping) -> Self {
        Self { mapping }
    }

    /// Compile a condition into its compact string form.
    pub fn compile(&self, condition: &Condition) -> String {
        self.compile_document(condition).to_string()
    }

    /// Compile a condition into a JSON document.
    pub fn compile_document(&self, condition: &Condition) -> Value {
        match condition {
            Condition::Or(terms) => self.compile_list("$or", terms),
            Condition::And(factors) => self.compile_list("$and", factors),
            Condition::Not(inner) => single_key("$not", self.compile_document(inner)),
            Condition::Predicate(predicate) => self.compile_predicate(predicate),
        }
    }

    fn compile_list(&self, op: &str, children: &[Condition]) -> Value {
        // A lone child renders as itself, same as the parser's collapsing
        if let [only] = children {
            return self.compile_document(only);
        }
        let items = children.iter().map(|c| self.compile_document(c)).collect();
        single_key(op, Value::Array(items))
    }

    fn compile_predicate(&self, predicate: &Predicate) -> Value {
        let operand = match &predicate.operand {
            Operand::Null => Value::Null,
            Operand::Channel(name) => Value::String(self.mapping.resolve_field_path(name)),
            Operand::String(s) => Value::String(s.clone()),
            Operand::Number(n) => Value::Number(n.clone()),
        };
        let comparison = single_key(predicate.op.as_str(), operand);
        single_key(&self.mapping.resolve_field_path(&predicate.channel), comparison)
    }
}

fn single_key(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}
