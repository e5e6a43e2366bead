use super::args::Check;
use super::Registry;
use crate::{errors, SeqValue, Value};

pub(super) fn register(registry: &mut Registry) {
    // (seq/range), (seq/range min), (seq/range min max); null means "default".
    registry.function("seq/range", |_, site, args| {
        let check = Check::new("seq/range", site);
        if args.len() > 2 {
            return Err(errors::wrong_arity_range(check.loc(), "seq/range", 0, 2));
        }
        let mut bounds = args.into_iter();
        let start = match bounds.next() {
            None | Some(Value::Null) => 0.0,
            Some(value) => check.number(0, &value)?,
        };
        let end = match bounds.next() {
            None | Some(Value::Null) => None,
            Some(value) => Some(check.number(1, &value)?),
        };
        Ok(Value::Seq(SeqValue::range(start, end)))
    });
    registry.function("seq/map", |_, site, args| {
        let check = Check::new("seq/map", site);
        let [seq, func] = check.exactly(args, "a seq and a function")?;
        let seq = check.seq(0, seq)?;
        Ok(Value::Seq(seq.map(check.function(1, func)?, site)))
    });
    registry.function("seq/flatMap", |_, site, args| {
        let check = Check::new("seq/flatMap", site);
        let [seq, func] = check.exactly(args, "a seq and a function")?;
        let seq = check.seq(0, seq)?;
        Ok(Value::Seq(seq.flat_map(check.function(1, func)?, site)))
    });
    registry.function("seq/filter", |_, site, args| {
        let check = Check::new("seq/filter", site);
        let [seq, func] = check.exactly(args, "a seq and a function")?;
        let seq = check.seq(0, seq)?;
        Ok(Value::Seq(seq.filter(check.function(1, func)?, site)))
    });
    registry.function("seq/take", |_, site, args| {
        let check = Check::new("seq/take", site);
        let [seq, count] = check.exactly(args, "a seq and a number")?;
        let seq = check.seq(0, seq)?;
        Ok(Value::Seq(seq.take(check.count(1, &count)?)))
    });
    registry.function("seq/toList", |interpreter, site, args| {
        let check = Check::new("seq/toList", site);
        let [seq] = check.exactly(args, "a seq")?;
        Ok(Value::List(check.seq(0, seq)?.to_list(interpreter)?))
    });
}
