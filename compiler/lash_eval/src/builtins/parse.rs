use super::args::Check;
use super::Registry;
use crate::{errors, MapValue, Value};

pub(super) fn register(registry: &mut Registry) {
    registry.function("parse/json", |_, site, args| {
        let check = Check::new("parse/json", site);
        let [raw] = check.exactly(args, "a string")?;
        let raw = check.string(0, &raw)?;
        let json: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|err| errors::invalid_json(site.loc, &err.to_string()))?;
        Ok(from_json(json))
    });
    registry.function("parse/lines", |_, site, args| {
        let check = Check::new("parse/lines", site);
        let [raw] = check.exactly(args, "a string")?;
        let raw = check.string(0, &raw)?;
        Ok(raw.trim().split('\n').map(Value::from).collect())
    });
}

fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
        serde_json::Value::String(s) => Value::from(s),
        serde_json::Value::Array(items) => items.into_iter().map(from_json).collect(),
        serde_json::Value::Object(fields) => Value::Map(
            fields
                .into_iter()
                .map(|(k, v)| (Value::from(k), from_json(v)))
                .collect::<MapValue>(),
        ),
    }
}
