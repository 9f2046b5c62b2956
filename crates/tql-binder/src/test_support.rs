//! A small log record and registries for unit tests

use std::collections::{BTreeMap, HashMap};

use tql_ast::Path;

use crate::{
    FunctionRegistry, GetSetter, Getter, ParamKind, Setter, Val,
};

const FIELDS: &[&str] = &["name", "body", "severity_number", "attributes", "trace_id"];

#[derive(Debug, Clone, Default)]
pub(crate) struct Record {
    fields: BTreeMap<String, Val>,
}

impl Record {
    pub(crate) fn field(&self, name: &str) -> Val {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    pub(crate) fn attribute(&self, key: &str) -> Val {
        self.fields
            .get("attributes")
            .and_then(Val::as_map)
            .and_then(|map| map.get(key))
            .cloned()
            .unwrap_or_default()
    }
}

pub(crate) fn record() -> Record {
    let attributes: BTreeMap<String, Val> = [
        ("http.method".to_string(), Val::from("GET")),
        ("http.path".to_string(), Val::from("/health")),
        ("test".to_string(), Val::from("fail")),
    ]
    .into_iter()
    .collect();

    let mut rec = Record::default();
    rec.fields.insert("name".into(), Val::from("ok"));
    rec.fields.insert("severity_number".into(), Val::Int(9));
    rec.fields.insert("attributes".into(), Val::Map(attributes));
    rec.fields.insert("trace_id".into(), Val::Bytes(vec![1, 2]));
    rec
}

struct FieldAccess {
    name: String,
    key: Option<String>,
}

impl Getter<Record> for FieldAccess {
    fn get(&self, rec: &mut Record) -> Val {
        match &self.key {
            None => rec.field(&self.name),
            Some(key) => rec
                .fields
                .get(&self.name)
                .and_then(Val::as_map)
                .and_then(|map| map.get(key))
                .cloned()
                .unwrap_or_default(),
        }
    }
}

impl Setter<Record> for FieldAccess {
    fn set(&self, rec: &mut Record, value: Val) {
        match &self.key {
            None => {
                rec.fields.insert(self.name.clone(), value);
            }
            Some(key) => {
                let entry = rec
                    .fields
                    .entry(self.name.clone())
                    .or_insert_with(|| Val::Map(BTreeMap::new()));
                if let Val::Map(map) = entry {
                    map.insert(key.clone(), value);
                }
            }
        }
    }
}

pub(crate) fn resolve_path(path: &Path) -> Result<Box<dyn GetSetter<Record>>, String> {
    match path.fields.as_slice() {
        [field] if FIELDS.contains(&field.name.as_str()) => Ok(Box::new(FieldAccess {
            name: field.name.clone(),
            key: field.map_key.clone(),
        })),
        [field] => Err(format!("no field named {}", field.name)),
        _ => Err("nested paths are not supported".to_string()),
    }
}

pub(crate) fn enums() -> HashMap<String, i64> {
    [("SEVERITY_NUMBER_INFO", 9), ("SEVERITY_NUMBER_WARN", 13)]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

pub(crate) fn registry() -> FunctionRegistry<Record> {
    let mut registry = FunctionRegistry::<Record>::new();
    registry
        .register("drop", &[], |_| Ok(Box::new(|_: &mut Record| Val::Bool(true))))
        .register("set", &[ParamKind::Setter, ParamKind::Getter], |mut args| {
            let target = args.take_setter()?;
            let value = args.take_getter()?;
            Ok(Box::new(move |rec: &mut Record| {
                let v = value.get(rec);
                target.set(rec, v);
                Val::Nil
            }))
        })
        .register("set_severity", &[ParamKind::Setter, ParamKind::Enum], |mut args| {
            let target = args.take_setter()?;
            let level = args.take_enum()?;
            Ok(Box::new(move |rec: &mut Record| {
                target.set(rec, Val::Int(level));
                Val::Nil
            }))
        })
        .register("concat", &[ParamKind::Getter, ParamKind::Getter], |mut args| {
            let left = args.take_getter()?;
            let right = args.take_getter()?;
            Ok(Box::new(move |rec: &mut Record| {
                let l = left.get(rec);
                let r = right.get(rec);
                Val::String(format!(
                    "{}{}",
                    l.as_str().unwrap_or_default(),
                    r.as_str().unwrap_or_default()
                ))
            }))
        })
        .register(
            "keep_keys",
            &[ParamKind::GetSetter, ParamKind::StringList],
            |mut args| {
                let target = args.take_get_setter()?;
                let keys = args.take_string_list()?;
                Ok(Box::new(move |rec: &mut Record| {
                    if let Val::Map(mut map) = target.get(rec) {
                        map.retain(|k, _| keys.contains(k));
                        target.set(rec, Val::Map(map));
                    }
                    Val::Nil
                }))
            },
        )
        .register("truncate", &[ParamKind::GetSetter, ParamKind::Int], |mut args| {
            let target = args.take_get_setter()?;
            let limit = args.take_int()?;
            let limit = usize::try_from(limit).map_err(|_| "limit must not be negative".to_string())?;
            Ok(Box::new(move |rec: &mut Record| {
                if let Val::String(s) = target.get(rec) {
                    target.set(rec, Val::String(s.chars().take(limit).collect()));
                }
                Val::Nil
            }))
        });
    registry
}
