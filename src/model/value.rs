use serde_json::{Map, Value};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime};

use super::descriptor::{FieldKind, WireEnum};
use super::instance::ModelInstance;
use super::union::ResolvedVariant;

/// ISO-8601 date-time that remembers its wire spelling.
///
/// Re-encoding a decoded value reproduces the original string, so `Z` vs
/// `+00:00` or trailing fractional zeros never drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireDateTime {
    raw: String,
    value: OffsetDateTime,
}

impl WireDateTime {
    /// Parse an ISO-8601 date-time with an offset, a `Z` suffix, or no offset (read as UTC).
    pub fn parse(input: &str) -> Result<Self, time::error::Parse> {
        let value = OffsetDateTime::parse(input, &Rfc3339)
            .or_else(|_| OffsetDateTime::parse(input, &Iso8601::DEFAULT))
            .or_else(|_| {
                PrimitiveDateTime::parse(input, &Iso8601::DEFAULT).map(|dt| dt.assume_utc())
            })?;
        Ok(Self {
            raw: input.to_owned(),
            value,
        })
    }

    /// Format `value` as RFC 3339 for sending.
    pub fn from_datetime(value: OffsetDateTime) -> Result<Self, time::error::Format> {
        Ok(Self {
            raw: value.format(&Rfc3339)?,
            value,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> OffsetDateTime {
        self.value
    }
}

/// A coerced field value held by a [`ModelInstance`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Explicit `null`; distinct from an unset field.
    Null,
    /// A JSON string, number, or boolean already checked against its scalar type.
    Scalar(Value),
    Date(WireDateTime),
    /// One of the declared wire values of the field's enum.
    Enum(&'static str),
    Model(ModelInstance),
    Variant(ResolvedVariant),
    List(Vec<FieldValue>),
    Map(Map<String, Value>),
}

impl FieldValue {
    pub fn enumeration<E: WireEnum>(value: E) -> Self {
        Self::Enum(value.as_wire())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Value::String(s)) => Some(s.as_str()),
            Self::Enum(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Scalar(v) => v.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => v.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scalar(v) => v.as_bool(),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&WireDateTime> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&ModelInstance> {
        match self {
            Self::Model(m) => Some(m),
            Self::Variant(v) => Some(v.instance()),
            _ => None,
        }
    }

    pub fn as_variant(&self) -> Option<&ResolvedVariant> {
        match self {
            Self::Variant(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Short description of the value's shape for error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Null => "null".to_owned(),
            Self::Scalar(v) => json_kind(v).to_owned(),
            Self::Date(_) => "date-time".to_owned(),
            Self::Enum(s) => format!("enum value `{s}`"),
            Self::Model(m) => format!("{} object", m.schema().name()),
            Self::Variant(v) => format!("{} object", v.union()),
            Self::List(_) => "list".to_owned(),
            Self::Map(_) => "object".to_owned(),
        }
    }

    /// Whether this value has the shape `kind` expects, including enum
    /// membership and nested model identity.
    pub fn fits(&self, kind: FieldKind) -> bool {
        match (self, kind) {
            (Self::Null, _) => true,
            (Self::Scalar(v), FieldKind::Scalar(scalar)) => scalar.accepts(v),
            (Self::Date(_), FieldKind::Date) => true,
            (Self::Enum(s), FieldKind::Enum(e)) => e.lookup(s).is_some(),
            (Self::Model(m), FieldKind::NestedModel(model)) => m.schema().describes(&model),
            (Self::Variant(v), FieldKind::Variant(union)) => {
                v.union_type() == Some(union.type_id())
            }
            (Self::List(items), list_kind) => match list_kind.element() {
                Some(element) => items.iter().all(|item| !item.is_null() && item.fits(element)),
                None => false,
            },
            (Self::Map(_), FieldKind::MapOfMixed) => true,
            _ => false,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Scalar(Value::String(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Scalar(Value::String(value.to_owned()))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Scalar(Value::Bool(value))
    }
}

impl From<WireDateTime> for FieldValue {
    fn from(value: WireDateTime) -> Self {
        Self::Date(value)
    }
}

impl From<ModelInstance> for FieldValue {
    fn from(value: ModelInstance) -> Self {
        Self::Model(value)
    }
}

impl From<Map<String, Value>> for FieldValue {
    fn from(value: Map<String, Value>) -> Self {
        Self::Map(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value.into_iter().map(Self::from).collect())
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
