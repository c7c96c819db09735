//! Bidirectional mapping between decoded JSON trees and [`ModelInstance`]s.
//!
//! Both directions walk the descriptors in declaration order and collect every
//! field failure before reporting; nothing is returned half-decoded.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::descriptor::{FieldDescriptor, FieldKind, ModelSchema};
use super::error::{CoercionError, FieldError, FieldErrorKind, FieldPath, ModelError, SchemaError};
use super::instance::ModelInstance;
use super::union::{self, Unresolved};
use super::value::{FieldValue, WireDateTime, json_kind};

/// Decode `payload` into an instance of `schema`.
pub fn decode(schema: &Arc<ModelSchema>, payload: &Value) -> Result<ModelInstance, ModelError> {
    let mut failures = Vec::new();
    match decode_model(schema, payload, &FieldPath::root(), &mut failures)? {
        Some(instance) => Ok(instance),
        None => Err(CoercionError::new(schema.name(), failures).into()),
    }
}

/// Encode `instance` back into a wire payload, enforcing required fields.
pub fn encode(instance: &ModelInstance) -> Result<Value, ModelError> {
    let mut failures = Vec::new();
    let payload = encode_model(instance, &FieldPath::root(), &mut failures);
    if failures.is_empty() {
        Ok(payload)
    } else {
        Err(CoercionError::new(instance.schema().name(), failures).into())
    }
}

/// Decode an object at `path`. Returns `None` after recording failures.
pub(crate) fn decode_model(
    schema: &Arc<ModelSchema>,
    payload: &Value,
    path: &FieldPath,
    failures: &mut Vec<FieldError>,
) -> Result<Option<ModelInstance>, SchemaError> {
    let Value::Object(object) = payload else {
        failures.push(FieldError::new(
            path.clone(),
            FieldErrorKind::TypeMismatch {
                expected: format!("{} object", schema.name()),
                found: json_kind(payload).to_owned(),
            },
        ));
        return Ok(None);
    };

    let before = failures.len();
    let mut values = BTreeMap::new();
    for descriptor in schema.fields() {
        let field_path = path.key(descriptor.wire_name);
        match object.get(descriptor.wire_name) {
            None if descriptor.must_be_present() => failures.push(FieldError::new(
                field_path,
                FieldErrorKind::MissingRequiredField {
                    model: schema.name(),
                },
            )),
            None => {}
            Some(raw) => {
                let decoded = decode_field(schema.name(), descriptor, raw, &field_path, failures)?;
                if let Some(value) = decoded {
                    values.insert(descriptor.local_name, value);
                }
            }
        }
    }

    if failures.len() > before {
        return Ok(None);
    }

    let extra = object
        .iter()
        .filter(|(key, _)| schema.field_by_wire(key).is_none())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect::<Map<String, Value>>();

    Ok(Some(ModelInstance::from_parts(
        Arc::clone(schema),
        values,
        extra,
    )))
}

/// Coerce one present field value of `model`.
pub(crate) fn decode_field(
    model: &'static str,
    descriptor: &FieldDescriptor,
    raw: &Value,
    path: &FieldPath,
    failures: &mut Vec<FieldError>,
) -> Result<Option<FieldValue>, SchemaError> {
    if !raw.is_null() {
        return coerce_value(descriptor.kind, raw, path, failures);
    }
    // Optional fields take `null` as an explicit value; required ones only when nullable.
    if descriptor.must_be_present() {
        failures.push(FieldError::new(
            path.clone(),
            FieldErrorKind::MissingRequiredField { model },
        ));
        return Ok(None);
    }
    Ok(Some(FieldValue::Null))
}

fn coerce_value(
    kind: FieldKind,
    raw: &Value,
    path: &FieldPath,
    failures: &mut Vec<FieldError>,
) -> Result<Option<FieldValue>, SchemaError> {
    let mismatch = |failures: &mut Vec<FieldError>| {
        failures.push(FieldError::new(
            path.clone(),
            FieldErrorKind::TypeMismatch {
                expected: kind.expected(),
                found: json_kind(raw).to_owned(),
            },
        ));
        None
    };

    let value = match (kind, raw) {
        (FieldKind::Scalar(scalar), _) if scalar.accepts(raw) => {
            Some(FieldValue::Scalar(raw.clone()))
        }
        (FieldKind::Date, Value::String(input)) => match WireDateTime::parse(input) {
            Ok(date) => Some(FieldValue::Date(date)),
            Err(err) => {
                failures.push(FieldError::new(
                    path.clone(),
                    FieldErrorKind::DateParse {
                        input: input.clone(),
                        reason: err.to_string(),
                    },
                ));
                None
            }
        },
        (FieldKind::Enum(descriptor), Value::String(input)) => match descriptor.lookup(input) {
            Some(wire) => Some(FieldValue::Enum(wire)),
            None => {
                failures.push(FieldError::new(
                    path.clone(),
                    FieldErrorKind::InvalidEnumValue {
                        enum_name: descriptor.name,
                        value: input.clone(),
                        allowed: descriptor.values,
                    },
                ));
                None
            }
        },
        (FieldKind::NestedModel(model), Value::Object(_)) => {
            decode_model(&model.schema()?, raw, path, failures)?.map(FieldValue::Model)
        }
        (FieldKind::Variant(union_ref), Value::Object(_)) => {
            let descriptor = union_ref.descriptor()?;
            match union::resolve_at(&descriptor, raw, path)? {
                Ok(resolved) => Some(FieldValue::Variant(resolved)),
                Err(Unresolved::Tagged { failures: tagged, .. }) => {
                    failures.extend(tagged);
                    None
                }
                Err(Unresolved::NoMatch(err)) => {
                    failures.push(FieldError::new(
                        path.clone(),
                        FieldErrorKind::NoMatchingVariant(Box::new(err)),
                    ));
                    None
                }
            }
        }
        (
            FieldKind::ListOfScalar(_) | FieldKind::ListOfModel(_) | FieldKind::ListOfVariant(_),
            Value::Array(items),
        ) => {
            let Some(element) = kind.element() else {
                return Ok(mismatch(failures));
            };
            let before = failures.len();
            let mut decoded = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                if let Some(value) = coerce_value(element, item, &path.index(index), failures)? {
                    decoded.push(value);
                }
            }
            (failures.len() == before).then_some(FieldValue::List(decoded))
        }
        (FieldKind::MapOfMixed, Value::Object(object)) => Some(FieldValue::Map(object.clone())),
        _ => mismatch(failures),
    };
    Ok(value)
}

fn encode_model(
    instance: &ModelInstance,
    path: &FieldPath,
    failures: &mut Vec<FieldError>,
) -> Value {
    let schema = instance.schema();
    let mut object = instance.extra().clone();
    for descriptor in schema.fields() {
        let field_path = path.key(descriptor.wire_name);
        match instance.get(descriptor.local_name) {
            None | Some(FieldValue::Null) if descriptor.must_be_present() => {
                failures.push(FieldError::new(
                    field_path,
                    FieldErrorKind::MissingRequiredField {
                        model: schema.name(),
                    },
                ));
            }
            None => {}
            Some(value) => {
                object.insert(
                    descriptor.wire_name.to_owned(),
                    encode_value(value, &field_path, failures),
                );
            }
        }
    }
    Value::Object(object)
}

fn encode_value(value: &FieldValue, path: &FieldPath, failures: &mut Vec<FieldError>) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Scalar(raw) => raw.clone(),
        FieldValue::Date(date) => Value::String(date.as_str().to_owned()),
        FieldValue::Enum(wire) => Value::String((*wire).to_owned()),
        FieldValue::Model(instance) => encode_model(instance, path, failures),
        FieldValue::Variant(resolved) => encode_model(resolved.instance(), path, failures),
        FieldValue::List(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| encode_value(item, &path.index(index), failures))
                .collect(),
        ),
        FieldValue::Map(object) => Value::Object(object.clone()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{FieldDescriptor, FieldKind, Model, sdk_model, wire_enum};

    wire_enum! {
        enum LineStatus {
            Active => "active",
            Deleted => "deleted",
        }
    }

    sdk_model! {
        struct Line as "Line" {
            FieldDescriptor::required("id", "id", FieldKind::string()),
            FieldDescriptor::optional("billingGroupID", "billing_group_id", FieldKind::string()),
            FieldDescriptor::optional("status", "status", FieldKind::enumeration::<LineStatus>()),
            FieldDescriptor::optional("tags", "tags", FieldKind::string_list()),
            FieldDescriptor::optional("count", "count", FieldKind::integer()),
            FieldDescriptor::optional("cost", "cost", FieldKind::float()),
            FieldDescriptor::optional("enabled", "enabled", FieldKind::boolean()),
            FieldDescriptor::optional("createdAt", "created_at", FieldKind::Date),
            FieldDescriptor::optional("misc", "misc", FieldKind::MapOfMixed),
            FieldDescriptor::required("parent", "parent", FieldKind::string()).nullable(),
        }
    }

    sdk_model! {
        struct LineEnvelope as "LineEnvelope" {
            FieldDescriptor::required("data", "data", FieldKind::model::<Line>()),
            FieldDescriptor::optional("history", "history", FieldKind::model_list::<Line>()),
        }
    }

    fn failures(err: ModelError) -> CoercionError {
        match err {
            ModelError::Coercion(err) => err,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wire_names_are_remapped_in_both_directions() {
        let line = Line::parse(&json!({"id": "l1", "billing_group_id": "bg1"})).unwrap();
        assert_eq!(line.inner.get_str("billingGroupID"), Some("bg1"));
        assert!(line.inner.get("billing_group_id").is_none());

        let payload = line.to_payload().unwrap();
        assert_eq!(payload, json!({"id": "l1", "billing_group_id": "bg1"}));
        assert!(payload.get("billingGroupID").is_none());
    }

    #[test]
    fn absent_optional_is_unset_and_null_is_explicit() {
        let line = Line::parse(&json!({"id": "l1", "status": null})).unwrap();
        assert!(!line.inner.is_set("tags"));
        assert_eq!(line.inner.get("status"), Some(&FieldValue::Null));
        assert_eq!(line.to_payload().unwrap(), json!({"id": "l1", "status": null}));
    }

    #[test]
    fn required_nullable_accepts_null_or_absence() {
        let line = Line::parse(&json!({"id": "l1", "parent": null})).unwrap();
        assert_eq!(line.inner.get("parent"), Some(&FieldValue::Null));
        assert!(Line::parse(&json!({"id": "l1"})).is_ok());
    }

    #[test]
    fn missing_or_null_required_field_is_reported_by_name() {
        for payload in [json!({}), json!({"id": null})] {
            let err = failures(Line::parse(&payload).unwrap_err());
            assert_eq!(err.paths(), vec!["id"]);
            assert_eq!(
                err.failures()[0].kind,
                FieldErrorKind::MissingRequiredField { model: "Line" }
            );
        }
    }

    #[test]
    fn scalar_type_mismatches_are_reported() {
        let payload = json!({"id": 7, "count": 1.5, "enabled": "yes", "cost": "1"});
        let err = failures(Line::parse(&payload).unwrap_err());
        assert_eq!(err.paths(), vec!["id", "count", "cost", "enabled"]);
        assert_eq!(
            err.failure_at("count").map(|f| &f.kind),
            Some(&FieldErrorKind::TypeMismatch {
                expected: "integer".to_owned(),
                found: "number".to_owned(),
            })
        );
    }

    #[test]
    fn every_failure_is_aggregated_in_one_pass() {
        let err = failures(
            Line::parse(&json!({
                "status": "gone",
                "tags": ["a", "b", 3],
                "created_at": "not a date",
                "misc": []
            }))
            .unwrap_err(),
        );
        assert_eq!(
            err.paths(),
            vec!["id", "status", "tags[2]", "created_at", "misc"]
        );
        assert!(matches!(
            &err.failure_at("status").unwrap().kind,
            FieldErrorKind::InvalidEnumValue { value, allowed, .. }
                if value == "gone" && *allowed == ["active", "deleted"]
        ));
        assert!(matches!(
            err.failure_at("created_at").unwrap().kind,
            FieldErrorKind::DateParse { .. }
        ));
    }

    #[test]
    fn enum_accepts_each_declared_value() {
        for status in ["active", "deleted"] {
            let line = Line::parse(&json!({"id": "l1", "status": status})).unwrap();
            assert_eq!(line.inner.get_str("status"), Some(status));
        }
    }

    #[test]
    fn nested_errors_carry_the_full_path() {
        let err = failures(
            LineEnvelope::parse(&json!({
                "data": {"id": "l1", "status": "gone"},
                "history": [{"id": "l0"}, {"tags": "x"}]
            }))
            .unwrap_err(),
        );
        assert_eq!(
            err.paths(),
            vec!["data.status", "history[1].id", "history[1].tags"]
        );
        assert_eq!(err.model(), "LineEnvelope");
    }

    #[test]
    fn empty_list_is_distinct_from_absent_list() {
        let with_empty = Line::parse(&json!({"id": "l1", "tags": []})).unwrap();
        assert_eq!(with_empty.inner.get_strs("tags"), Some(vec![]));
        let without = Line::parse(&json!({"id": "l1"})).unwrap();
        assert_eq!(without.inner.get_strs("tags"), None);
        assert_eq!(with_empty.to_payload().unwrap(), json!({"id": "l1", "tags": []}));
    }

    #[test]
    fn map_values_pass_through_unvalidated() {
        let misc = json!({"anything": [1, {"deep": null}], "flag": true});
        let line = Line::parse(&json!({"id": "l1", "misc": misc})).unwrap();
        assert_eq!(line.inner.get_map("misc").map(|m| m.len()), Some(2));
        assert_eq!(line.to_payload().unwrap()["misc"], misc);
    }

    #[test]
    fn round_trip_preserves_unknown_keys_and_list_order() {
        let payload = json!({
            "data": {
                "id": "l1",
                "billing_group_id": "bg1",
                "status": "active",
                "tags": ["z", "a", "m"],
                "count": 3,
                "cost": 0.25,
                "enabled": false,
                "created_at": "2024-03-01T12:30:00.120+01:00",
                "misc": {"k": "v"},
                "parent": null,
                "future_field": {"nested": [3, 2, 1]}
            },
            "history": [{"id": "h2"}, {"id": "h1"}],
            "meta": {"page": 1}
        });
        let envelope = LineEnvelope::parse(&payload).unwrap();
        assert_eq!(envelope.to_payload().unwrap(), payload);
        assert_eq!(envelope.inner.extra().get("meta"), Some(&json!({"page": 1})));

        let history: Vec<Line> = envelope.inner.get_models("history").unwrap();
        let ids = history
            .iter()
            .filter_map(|l| l.inner.get_str("id"))
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["h2", "h1"]);
    }

    #[test]
    fn non_object_payload_is_a_root_mismatch() {
        let err = failures(Line::parse(&json!(["id"])).unwrap_err());
        assert_eq!(err.paths(), vec!["(root)"]);
    }

    #[test]
    fn encode_reports_every_missing_required_field_recursively() {
        let mut envelope = LineEnvelope::empty().unwrap();
        let nested = Line::empty().unwrap();
        envelope.inner.put_model("data", nested);
        envelope
            .inner
            .put_models("history", vec![Line::empty().unwrap()]);

        let err = failures(envelope.to_payload().unwrap_err());
        assert_eq!(err.paths(), vec!["data.id", "history[0].id"]);
    }

    #[test]
    fn encode_rejects_explicit_null_on_strict_required_field() {
        let mut line = Line::empty().unwrap();
        line.inner.set("id", FieldValue::Null).unwrap();
        let err = failures(line.to_payload().unwrap_err());
        assert_eq!(err.paths(), vec!["id"]);
    }
}
