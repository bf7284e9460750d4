//! Request validation driven by each entity's rule tables.

use crate::error::AppError;
use crate::model::{EnumRule, Resource};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a full document body and return the typed record together with
    /// its normalized field map (unknown fields dropped, defaults filled).
    pub fn validate<R: Resource>(body: Value) -> Result<(R, Map<String, Value>), AppError> {
        let mut fields = match body {
            Value::Object(m) => m,
            _ => return Err(AppError::Validation("body must be a JSON object".into())),
        };
        R::normalize(&mut fields);
        check_required(&fields, R::REQUIRED)?;
        for rule in R::ENUMS {
            check_enum(&fields, rule)?;
        }
        let record: R = serde_json::from_value(Value::Object(fields))
            .map_err(|e| AppError::Validation(format!("invalid {}: {}", R::LABEL.to_lowercase(), e)))?;
        record.check()?;
        let normalized = match serde_json::to_value(&record) {
            Ok(Value::Object(m)) => m,
            Ok(_) => return Err(AppError::Unexpected(format!("{} did not serialize to an object", R::LABEL))),
            Err(e) => return Err(AppError::Unexpected(e.to_string())),
        };
        Ok((record, normalized))
    }
}

fn is_missing(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn check_required(fields: &Map<String, Value>, required: &[&str]) -> Result<(), AppError> {
    match required.iter().find(|f| is_missing(fields.get(**f))) {
        Some(field) => Err(AppError::Validation(format!("{} is required", field))),
        None => Ok(()),
    }
}

/// Collect `(display path, value)` pairs addressed by a rule path. Absent and
/// null values are skipped; optional fields are not enum violations.
fn resolve<'a>(fields: &'a Map<String, Value>, path: &str) -> Vec<(String, &'a Value)> {
    let mut current: Vec<(String, &'a Value)> = Vec::new();
    for (depth, segment) in path.split('.').enumerate() {
        let (key, each) = match segment.strip_suffix("[]") {
            Some(k) => (k, true),
            None => (segment, false),
        };
        let mut next = Vec::new();
        let mut step = |prefix: String, value: Option<&'a Value>| {
            let Some(v) = value.filter(|v| !v.is_null()) else {
                return;
            };
            if each {
                if let Value::Array(items) = v {
                    for (i, item) in items.iter().enumerate() {
                        next.push((format!("{}[{}]", prefix, i), item));
                    }
                }
            } else {
                next.push((prefix, v));
            }
        };
        if depth == 0 {
            step(key.to_string(), fields.get(key));
        } else {
            for (prefix, v) in current.drain(..) {
                step(format!("{}.{}", prefix, key), v.get(key));
            }
        }
        current = next;
    }
    current
}

fn check_enum(fields: &Map<String, Value>, rule: &EnumRule) -> Result<(), AppError> {
    for (path, value) in resolve(fields, rule.field) {
        let ok = value.as_str().map(|s| rule.allowed.contains(&s)).unwrap_or(false);
        if !ok {
            return Err(AppError::Validation(format!(
                "{} must be one of: {}",
                path,
                rule.allowed.join(", ")
            )));
        }
    }
    Ok(())
}
