//! Typed attribute columns.
//!
//! Every attribute stores a default plus sparse per-element overrides. Reads through a
//! mismatched accessor convert instead of failing (a boolean read as a float is `0.0`/`1.0`,
//! an object read as a float is its JSON number or `0.0`).

use super::HashMap;
use serde_json::{Number, Value};

pub type AttributeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Vertex,
    Transaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Float,
    Boolean,
    /// Arbitrary JSON-shaped values.
    Object,
}

impl AttributeKind {
    pub fn default_value(self) -> Value {
        match self {
            AttributeKind::Float => float_to_value(0.0),
            AttributeKind::Boolean => Value::Bool(false),
            AttributeKind::Object => Value::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub id: AttributeId,
    pub element: ElementType,
    pub kind: AttributeKind,
    pub name: String,
    pub default: Value,
}

#[derive(Debug, Clone)]
pub(in crate::graph) enum Column {
    Float {
        default: f64,
        values: HashMap<usize, f64>,
    },
    Boolean {
        default: bool,
        values: HashMap<usize, bool>,
    },
    Object {
        default: Value,
        values: HashMap<usize, Value>,
    },
}

pub(in crate::graph) fn float_to_value(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}

fn value_to_bool(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    }
}

impl Column {
    pub(in crate::graph) fn new(kind: AttributeKind, default: &Value) -> Self {
        match kind {
            AttributeKind::Float => Column::Float {
                default: default.as_f64().unwrap_or(0.0),
                values: HashMap::default(),
            },
            AttributeKind::Boolean => Column::Boolean {
                default: value_to_bool(default).unwrap_or(false),
                values: HashMap::default(),
            },
            AttributeKind::Object => Column::Object {
                default: default.clone(),
                values: HashMap::default(),
            },
        }
    }

    pub(in crate::graph) fn float(&self, id: usize) -> f64 {
        match self {
            Column::Float { default, values } => values.get(&id).copied().unwrap_or(*default),
            Column::Boolean { .. } => {
                if self.boolean(id) {
                    1.0
                } else {
                    0.0
                }
            }
            Column::Object { .. } => self.object(id).as_f64().unwrap_or(0.0),
        }
    }

    pub(in crate::graph) fn set_float(&mut self, id: usize, value: f64) {
        match self {
            Column::Float { values, .. } => {
                values.insert(id, value);
            }
            Column::Boolean { values, .. } => {
                values.insert(id, value != 0.0);
            }
            Column::Object { values, .. } => {
                values.insert(id, float_to_value(value));
            }
        }
    }

    pub(in crate::graph) fn boolean(&self, id: usize) -> bool {
        match self {
            Column::Boolean { default, values } => values.get(&id).copied().unwrap_or(*default),
            Column::Float { .. } => self.float(id) != 0.0,
            Column::Object { .. } => value_to_bool(&self.object(id)).unwrap_or(false),
        }
    }

    pub(in crate::graph) fn set_boolean(&mut self, id: usize, value: bool) {
        match self {
            Column::Boolean { values, .. } => {
                values.insert(id, value);
            }
            Column::Float { values, .. } => {
                values.insert(id, if value { 1.0 } else { 0.0 });
            }
            Column::Object { values, .. } => {
                values.insert(id, Value::Bool(value));
            }
        }
    }

    pub(in crate::graph) fn object(&self, id: usize) -> Value {
        match self {
            Column::Object { default, values } => {
                values.get(&id).cloned().unwrap_or_else(|| default.clone())
            }
            Column::Float { .. } => float_to_value(self.float(id)),
            Column::Boolean { .. } => Value::Bool(self.boolean(id)),
        }
    }

    /// Values that cannot be represented by the column's kind reset the element to the default.
    pub(in crate::graph) fn set_object(&mut self, id: usize, value: Value) {
        match self {
            Column::Object { values, .. } => {
                values.insert(id, value);
            }
            Column::Float { values, .. } => match value.as_f64() {
                Some(f) => {
                    values.insert(id, f);
                }
                None => {
                    values.remove(&id);
                }
            },
            Column::Boolean { values, .. } => match value_to_bool(&value) {
                Some(b) => {
                    values.insert(id, b);
                }
                None => {
                    values.remove(&id);
                }
            },
        }
    }

    pub(in crate::graph) fn clear(&mut self, id: usize) {
        match self {
            Column::Float { values, .. } => {
                values.remove(&id);
            }
            Column::Boolean { values, .. } => {
                values.remove(&id);
            }
            Column::Object { values, .. } => {
                values.remove(&id);
            }
        }
    }
}
