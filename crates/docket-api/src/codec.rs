// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Conversion between backend JSON objects and records, driven by a form
//! schema so wire names and field types line up.

use docket_app::{Echo, FieldKind, FieldMap, FormSchema, Record, RecordKey, Value, parse_form_date};
use serde_json::{Map, Number, Value as Json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::NetworkError;

const ID_FIELD: &str = "id";

pub fn record_from_json(
    schema: &FormSchema,
    index: usize,
    json: &Json,
) -> Result<Record, NetworkError> {
    let object = json.as_object().ok_or_else(|| {
        NetworkError::Decode(format!("record {index} is not a JSON object"))
    })?;
    let key = key_from_json(object).unwrap_or_else(|| RecordKey::from_index(index));
    Ok(Record::from_fields(key, fields_from_json(schema, object)))
}

pub fn echo_from_json(schema: &FormSchema, object: &Map<String, Json>) -> Echo {
    Echo {
        key: key_from_json(object),
        fields: fields_from_json(schema, object),
    }
}

pub fn fields_to_json(schema: &FormSchema, fields: &FieldMap) -> Map<String, Json> {
    fields
        .iter()
        .map(|(name, value)| {
            let wire = schema
                .field(name)
                .map_or(name.as_str(), |field| field.wire_name());
            (wire.to_owned(), value_to_json(value))
        })
        .collect()
}

fn key_from_json(object: &Map<String, Json>) -> Option<RecordKey> {
    match object.get(ID_FIELD)? {
        Json::String(id) if !id.is_empty() => Some(RecordKey::new(id.as_str())),
        Json::Number(id) => Some(id.as_i64().map_or_else(
            || RecordKey::new(id.to_string()),
            RecordKey::from,
        )),
        _ => None,
    }
}

fn fields_from_json(schema: &FormSchema, object: &Map<String, Json>) -> FieldMap {
    object
        .iter()
        .filter(|(name, _)| name.as_str() != ID_FIELD)
        .map(|(wire, json)| match schema.field_by_wire_name(wire) {
            Some(field) => (field.name.clone(), value_from_json(Some(&field.kind), json)),
            None => (wire.clone(), value_from_json(None, json)),
        })
        .collect()
}

fn value_from_json(kind: Option<&FieldKind>, json: &Json) -> Value {
    match (kind, json) {
        (_, Json::Null) => Value::Null,
        (Some(FieldKind::Date), Json::String(raw)) => parse_form_date(raw)
            .map(Value::Date)
            .or_else(|| {
                OffsetDateTime::parse(raw, &Rfc3339)
                    .ok()
                    .map(Value::Timestamp)
            })
            .unwrap_or_else(|| Value::text(raw.as_str())),
        (Some(FieldKind::Number), Json::String(raw)) => raw
            .trim()
            .parse::<f64>()
            .map_or_else(|_| Value::text(raw.as_str()), Value::Number),
        (_, Json::Number(number)) => number
            .as_f64()
            .map_or_else(|| Value::text(number.to_string()), Value::Number),
        (_, Json::String(raw)) => Value::text(raw.as_str()),
        (_, Json::Bool(flag)) => Value::text(flag.to_string()),
        (_, nested @ (Json::Array(_) | Json::Object(_))) => Value::text(nested.to_string()),
    }
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Text(text) => Json::String(text.clone()),
        Value::Number(number) => {
            if number.fract() == 0.0 && number.abs() < 1e15 {
                Json::Number(Number::from(*number as i64))
            } else {
                Number::from_f64(*number).map_or(Json::Null, Json::Number)
            }
        }
        Value::Date(_) | Value::Timestamp(_) => Json::String(value.display()),
    }
}
