use super::args::Check;
use super::Registry;
use crate::Value;

pub(super) fn register(registry: &mut Registry) {
    registry.function("map/get", |_, site, args| {
        let check = Check::new("map/get", site);
        let [map, key] = check.exactly(args, "a map and a key")?;
        Ok(check.map(0, map)?.get(&key).cloned().unwrap_or(Value::Null))
    });
    registry.function("map/set", |_, site, args| {
        let check = Check::new("map/set", site);
        let [map, key, value] = check.exactly(args, "a map, a key and a value")?;
        Ok(Value::Map(check.map(0, map)?.insert(key, value)))
    });
    registry.function("map/has", |_, site, args| {
        let check = Check::new("map/has", site);
        let [map, key] = check.exactly(args, "a map and a key")?;
        Ok(Value::Bool(check.map(0, map)?.contains_key(&key)))
    });
    registry.function("map/remove", |_, site, args| {
        let check = Check::new("map/remove", site);
        let [map, key] = check.exactly(args, "a map and a key")?;
        Ok(Value::Map(check.map(0, map)?.remove(&key)))
    });
}
