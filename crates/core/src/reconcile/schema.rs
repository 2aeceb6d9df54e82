use serde_json::{Map, Value};

/// Declarative shape of a reconciled result: field names, types, bounds and defaults.
///
/// The schema is the sole authority on shape. Coercion always produces every
/// declared field and nothing else.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    Text { default: &'static str },
    TextList { max_len: Option<usize> },
    ObjectList { max_len: Option<usize>, item: Schema },
    Integer { min: i64, max: i64, default: i64 },
    Object(Schema),
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(self, name: &'static str) -> Self {
        self.text_or(name, "")
    }

    pub fn text_or(self, name: &'static str, default: &'static str) -> Self {
        self.field(name, FieldKind::Text { default })
    }

    pub fn text_list(self, name: &'static str, max_len: Option<usize>) -> Self {
        self.field(name, FieldKind::TextList { max_len })
    }

    pub fn object_list(self, name: &'static str, max_len: Option<usize>, item: Schema) -> Self {
        self.field(name, FieldKind::ObjectList { max_len, item })
    }

    pub fn integer(self, name: &'static str, min: i64, max: i64, default: i64) -> Self {
        debug_assert!(min <= max && (min..=max).contains(&default));
        self.field(name, FieldKind::Integer { min, max, default })
    }

    pub fn object(self, name: &'static str, nested: Schema) -> Self {
        self.field(name, FieldKind::Object(nested))
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    fn field(mut self, name: &'static str, kind: FieldKind) -> Self {
        self.fields.retain(|existing| existing.name != name);
        self.fields.push(FieldSpec { name, kind });
        self
    }

    /// Coerces a provider object into this shape. Never fails: missing or
    /// wrong-typed fields take their declared defaults.
    pub fn coerce_object(&self, source: &Map<String, Value>) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|field| (field.name.to_string(), field.kind.coerce(source.get(field.name))))
            .collect()
    }

    /// The fully-defaulted object for this shape.
    pub fn defaults(&self) -> Map<String, Value> {
        self.coerce_object(&Map::new())
    }
}

impl FieldKind {
    fn coerce(&self, value: Option<&Value>) -> Value {
        match self {
            Self::Text { default } => match value {
                Some(Value::String(text)) => Value::String(text.clone()),
                _ => Value::String((*default).to_string()),
            },
            Self::TextList { max_len } => match value {
                Some(Value::Array(items)) => Value::Array(bounded(
                    items.iter().filter_map(text_item).map(Value::String),
                    *max_len,
                )),
                _ => Value::Array(Vec::new()),
            },
            Self::ObjectList { max_len, item } => match value {
                Some(Value::Array(items)) => Value::Array(bounded(
                    items
                        .iter()
                        .filter_map(Value::as_object)
                        .map(|object| Value::Object(item.coerce_object(object))),
                    *max_len,
                )),
                _ => Value::Array(Vec::new()),
            },
            Self::Integer { min, max, default } => {
                let number = value.and_then(integer_value).unwrap_or(*default);
                Value::from(number.clamp(*min, *max))
            }
            Self::Object(nested) => match value {
                Some(Value::Object(object)) => Value::Object(nested.coerce_object(object)),
                _ => Value::Object(nested.defaults()),
            },
        }
    }
}

fn bounded(items: impl Iterator<Item = Value>, max_len: Option<usize>) -> Vec<Value> {
    match max_len {
        Some(limit) => items.take(limit).collect(),
        None => items.collect(),
    }
}

// Scalars inside a string list are kept as their textual form; nested values are dropped.
fn text_item(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn integer_value(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(integer) = number.as_i64() {
        return Some(integer);
    }
    // u64 beyond i64 range or fractional values; saturating cast keeps clamping correct.
    number.as_f64().map(|float| float.round() as i64)
}
