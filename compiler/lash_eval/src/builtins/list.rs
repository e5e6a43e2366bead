use im::Vector;

use super::args::Check;
use super::Registry;
use crate::{errors, Value};

pub(super) fn register(registry: &mut Registry) {
    registry.function("list/size", |_, site, args| {
        let check = Check::new("list/size", site);
        let [list] = check.exactly(args, "a list")?;
        Ok(Value::Number(check.list(0, list)?.len() as f64))
    });
    // Indices that are negative, fractional or past the end give null.
    registry.function("list/get", |_, site, args| {
        let check = Check::new("list/get", site);
        let [list, index] = check.exactly(args, "a list and an index")?;
        let list = check.list(0, list)?;
        let index = check.number(1, &index)?;
        Ok(whole_index(index)
            .and_then(|i| list.get(i).cloned())
            .unwrap_or(Value::Null))
    });
    // Setting one past the end appends.
    registry.function("list/set", |_, site, args| {
        let check = Check::new("list/set", site);
        let [list, index, value] = check.exactly(args, "a list, an index and a value")?;
        let mut list = check.list(0, list)?;
        let raw = check.number(1, &index)?;
        match whole_index(raw) {
            Some(i) if i < list.len() => {
                list.set(i, value);
            }
            Some(i) if i == list.len() => list.push_back(value),
            _ => return Err(check.out_of_range(raw, list.len())),
        }
        Ok(Value::List(list))
    });
    registry.function("list/map", |interpreter, site, args| {
        let check = Check::new("list/map", site);
        let [list, func] = check.exactly(args, "a list and a function")?;
        let list = check.list(0, list)?;
        let func = check.function(1, func)?;
        list.into_iter()
            .map(|item| interpreter.call(&func, vec![item], site))
            .collect::<Result<Vector<_>, _>>()
            .map(Value::List)
    });
    registry.function("list/flatMap", |interpreter, site, args| {
        let check = Check::new("list/flatMap", site);
        let [list, func] = check.exactly(args, "a list and a function")?;
        let list = check.list(0, list)?;
        let func = check.function(1, func)?;
        let mut out = Vector::new();
        for item in list {
            match interpreter.call(&func, vec![item], site)? {
                Value::List(items) => out.append(items),
                Value::Seq(seq) => out.append(seq.to_list(interpreter)?),
                other => return Err(errors::flat_map_result(site.loc, "list/flatMap", &other)),
            }
        }
        Ok(Value::List(out))
    });
    registry.function("list/filter", |interpreter, site, args| {
        let check = Check::new("list/filter", site);
        let [list, func] = check.exactly(args, "a list and a function")?;
        let list = check.list(0, list)?;
        let func = check.function(1, func)?;
        let mut out = Vector::new();
        for item in list {
            if interpreter.call(&func, vec![item.clone()], site)?.is_truthy() {
                out.push_back(item);
            }
        }
        Ok(Value::List(out))
    });
    registry.function("list/fold", |interpreter, site, args| {
        let check = Check::new("list/fold", site);
        let [list, init, func] =
            check.exactly(args, "a list, an initial value and a function")?;
        let list = check.list(0, list)?;
        let func = check.function(2, func)?;
        list.into_iter()
            .try_fold(init, |acc, item| interpreter.call(&func, vec![acc, item], site))
    });
    // `min` up to but excluding `max`, in steps of one.
    registry.function("list/range", |_, site, args| {
        let check = Check::new("list/range", site);
        let [min, max] = check.exactly(args, "a min and a max")?;
        let min = check.number(0, &min)?;
        let max = check.number(1, &max)?;
        let mut out = Vector::new();
        let mut current = min;
        while current < max {
            out.push_back(Value::Number(current));
            current += 1.0;
        }
        Ok(Value::List(out))
    });
    registry.function("list/take", |_, site, args| {
        let check = Check::new("list/take", site);
        let [list, count] = check.exactly(args, "a list and a number")?;
        let list = check.list(0, list)?;
        let count = check.count(1, &count)?;
        Ok(Value::List(list.take(count.min(list.len()))))
    });
    registry.function("list/drop", |_, site, args| {
        let check = Check::new("list/drop", site);
        let [list, count] = check.exactly(args, "a list and a number")?;
        let list = check.list(0, list)?;
        let count = check.count(1, &count)?;
        Ok(Value::List(list.skip(count.min(list.len()))))
    });
}

fn whole_index(n: f64) -> Option<usize> {
    (n >= 0.0 && n.fract() == 0.0).then(|| n as usize)
}
