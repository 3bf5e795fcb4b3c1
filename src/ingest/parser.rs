use crate::error::{Error, Result};
use crate::model::dag::DagFunction;

/// Parses a function record name into its `(num, preds)` pair.
///
/// Contract: `name.split('_')` yields `[head, p1, p2, ...]`. `head`'s
/// leading non-digit run is a type tag; the trailing digits are the
/// function's own number. Each subsequent segment is a predecessor number
/// unless it is non-numeric or empty — both are silently skipped (the
/// latter tolerates a trailing `_`).
pub fn parse_function_name(dag: &str, name: &str) -> Result<DagFunction> {
    let mut segments = name.split('_');
    let head = segments.next().unwrap_or("");

    let digit_start = head.find(|c: char| c.is_ascii_digit());
    let digit_start = digit_start.ok_or_else(|| Error::InputMalformed {
        dag: dag.to_string(),
        name: name.to_string(),
        reason: "head segment carries no numeric function id".to_string(),
    })?;

    let num: u32 = head[digit_start..].parse().map_err(|_| Error::InputMalformed {
        dag: dag.to_string(),
        name: name.to_string(),
        reason: format!("head segment '{}' has a non-numeric id suffix", head),
    })?;

    let preds = segments.filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())).map(|s| s.parse::<u32>().unwrap()).collect();

    Ok(DagFunction { num, preds })
}

/// Re-emits a function name as `head + '_' + sorted preds`, for round-trip
/// verification. `preds` is treated as a set: duplicates collapse and order
/// is normalized.
pub fn format_function_name(type_tag: &str, num: u32, preds: &[u32]) -> String {
    let mut sorted: Vec<u32> = preds.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    let mut out = format!("{type_tag}{num}");
    for p in sorted {
        out.push('_');
        out.push_str(&p.to_string());
    }
    out
}
