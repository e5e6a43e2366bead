use super::args::Check;
use super::Registry;
use crate::Value;

pub(super) fn register(registry: &mut Registry) {
    registry.function("string/size", |_, site, args| {
        let check = Check::new("string/size", site);
        let [s] = check.exactly(args, "a string")?;
        Ok(Value::Number(check.string(0, &s)?.chars().count() as f64))
    });
    registry.function("string/contains", |_, site, args| {
        let check = Check::new("string/contains", site);
        let [haystack, needle] = check.exactly(args, "a string and the text to find")?;
        Ok(Value::Bool(
            check.string(0, &haystack)?.contains(&*check.string(1, &needle)?),
        ))
    });
    registry.function("string/startsWith", |_, site, args| {
        let check = Check::new("string/startsWith", site);
        let [haystack, prefix] = check.exactly(args, "a string and a prefix")?;
        Ok(Value::Bool(
            check.string(0, &haystack)?.starts_with(&*check.string(1, &prefix)?),
        ))
    });
    registry.function("string/trim", |_, site, args| {
        let check = Check::new("string/trim", site);
        let [s] = check.exactly(args, "a string")?;
        Ok(Value::from(check.string(0, &s)?.trim()))
    });
    // Everything after the first occurrence of the needle, or the whole
    // string when it does not occur.
    registry.function("string/substringAfter", |_, site, args| {
        let check = Check::new("string/substringAfter", site);
        let [haystack, needle] = check.exactly(args, "a string and the text to find")?;
        let haystack = check.string(0, &haystack)?;
        let needle = check.string(1, &needle)?;
        Ok(match haystack.find(&*needle) {
            Some(index) => Value::from(&haystack[index + needle.len()..]),
            None => Value::Str(haystack),
        })
    });
}
