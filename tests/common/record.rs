//! A log record and the registries integration tests bind against

use std::collections::{BTreeMap, HashMap};

use tql_ast::{Field, Path};
use tql_binder::{FunctionRegistry, GetSetter, Getter, ParamKind, Setter, Val};

pub type Attributes = BTreeMap<String, Val>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogRecord {
    pub name: String,
    pub body: Val,
    pub severity_number: i64,
    pub trace_id: Vec<u8>,
    pub attributes: Attributes,
    pub resource_attributes: Attributes,
    pub dropped: bool,
}

impl LogRecord {
    pub fn sample() -> Self {
        Self {
            name: "ok".to_string(),
            body: Val::from("request served"),
            severity_number: 9,
            trace_id: vec![0x0a, 0x1b],
            attributes: attrs(&[("http.method", "GET"), ("http.path", "/health"), ("test", "fail")]),
            resource_attributes: attrs(&[("host.name", "web-1")]),
            dropped: false,
        }
    }
}

pub fn attrs(pairs: &[(&str, &str)]) -> Attributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Val::from(*v)))
        .collect()
}

/// Accessors over the fixed fields of [`LogRecord`]
enum LogField {
    Name,
    Body,
    SeverityNumber,
    TraceId,
    Attributes,
    Attribute(String),
    ResourceAttributes,
    ResourceAttribute(String),
}

impl Getter<LogRecord> for LogField {
    fn get(&self, rec: &mut LogRecord) -> Val {
        match self {
            LogField::Name => Val::from(rec.name.as_str()),
            LogField::Body => rec.body.clone(),
            LogField::SeverityNumber => Val::Int(rec.severity_number),
            LogField::TraceId => Val::Bytes(rec.trace_id.clone()),
            LogField::Attributes => Val::Map(rec.attributes.clone()),
            LogField::Attribute(key) => rec.attributes.get(key).cloned().unwrap_or_default(),
            LogField::ResourceAttributes => Val::Map(rec.resource_attributes.clone()),
            LogField::ResourceAttribute(key) => rec
                .resource_attributes
                .get(key)
                .cloned()
                .unwrap_or_default(),
        }
    }
}

impl Setter<LogRecord> for LogField {
    fn set(&self, rec: &mut LogRecord, value: Val) {
        match (self, value) {
            (LogField::Name, Val::String(s)) => rec.name = s,
            (LogField::Body, value) => rec.body = value,
            (LogField::SeverityNumber, Val::Int(n)) => rec.severity_number = n,
            (LogField::TraceId, Val::Bytes(b)) => rec.trace_id = b,
            (LogField::Attributes, Val::Map(map)) => rec.attributes = map,
            (LogField::Attribute(key), value) => {
                rec.attributes.insert(key.clone(), value);
            }
            (LogField::ResourceAttributes, Val::Map(map)) => rec.resource_attributes = map,
            (LogField::ResourceAttribute(key), value) => {
                rec.resource_attributes.insert(key.clone(), value);
            }
            // Mismatched types are ignored, as a typed record would
            _ => {}
        }
    }
}

pub fn resolve_path(path: &Path) -> Result<Box<dyn GetSetter<LogRecord>>, String> {
    let field = match path.fields.as_slice() {
        [Field { name, map_key: None }] => match name.as_str() {
            "name" => LogField::Name,
            "body" => LogField::Body,
            "severity_number" => LogField::SeverityNumber,
            "trace_id" => LogField::TraceId,
            "attributes" => LogField::Attributes,
            other => return Err(format!("unknown field {}", other)),
        },
        [Field { name, map_key: Some(key) }] if name == "attributes" => {
            LogField::Attribute(key.clone())
        }
        [Field { name: resource, map_key: None }, Field { name, map_key }]
            if resource == "resource" && name == "attributes" =>
        {
            match map_key {
                Some(key) => LogField::ResourceAttribute(key.clone()),
                None => LogField::ResourceAttributes,
            }
        }
        _ => return Err("path is not supported on log records".to_string()),
    };
    Ok(Box::new(field))
}

pub fn enums() -> HashMap<String, i64> {
    [
        ("SEVERITY_NUMBER_DEBUG", 5),
        ("SEVERITY_NUMBER_INFO", 9),
        ("SEVERITY_NUMBER_WARN", 13),
        ("SEVERITY_NUMBER_ERROR", 17),
        ("FOO", 7),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect()
}

pub fn registry() -> FunctionRegistry<LogRecord> {
    let mut registry = FunctionRegistry::<LogRecord>::new();
    registry
        .register("drop", &[], |_| {
            Ok(Box::new(|rec: &mut LogRecord| {
                rec.dropped = true;
                Val::Nil
            }))
        })
        .register("valid1", &[], |_| Ok(Box::new(|_: &mut LogRecord| Val::Int(1))))
        .register("valid2", &[], |_| Ok(Box::new(|_: &mut LogRecord| Val::Int(2))))
        .register("FOO", &[], |_| Ok(Box::new(|_: &mut LogRecord| Val::Int(42))))
        .register("set", &[ParamKind::Setter, ParamKind::Getter], |mut args| {
            let target = args.take_setter()?;
            let value = args.take_getter()?;
            Ok(Box::new(move |rec: &mut LogRecord| {
                let v = value.get(rec);
                target.set(rec, v);
                Val::Nil
            }))
        })
        .register(
            "keep_keys",
            &[ParamKind::GetSetter, ParamKind::StringList],
            |mut args| {
                let target = args.take_get_setter()?;
                let keys = args.take_string_list()?;
                Ok(Box::new(move |rec: &mut LogRecord| {
                    if let Val::Map(mut map) = target.get(rec) {
                        map.retain(|k, _| keys.contains(k));
                        target.set(rec, Val::Map(map));
                    }
                    Val::Nil
                }))
            },
        )
        .register(
            "delete_key",
            &[ParamKind::GetSetter, ParamKind::String],
            |mut args| {
                let target = args.take_get_setter()?;
                let key = args.take_string()?;
                Ok(Box::new(move |rec: &mut LogRecord| {
                    if let Val::Map(mut map) = target.get(rec) {
                        map.remove(&key);
                        target.set(rec, Val::Map(map));
                    }
                    Val::Nil
                }))
            },
        )
        .register("concat", &[ParamKind::Getter, ParamKind::Getter], |mut args| {
            let left = args.take_getter()?;
            let right = args.take_getter()?;
            Ok(Box::new(move |rec: &mut LogRecord| {
                let l = left.get(rec);
                let r = right.get(rec);
                Val::String(format!(
                    "{}{}",
                    l.as_str().unwrap_or_default(),
                    r.as_str().unwrap_or_default()
                ))
            }))
        });
    registry
}

/// Run compiled queries against a record the way a processor would
pub fn apply(queries: &[tql_binder::Query<LogRecord>], rec: &mut LogRecord) {
    for query in queries {
        if query.condition.evaluate(rec) {
            (query.function)(rec);
        }
    }
}
