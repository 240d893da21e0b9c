use serde_json::Value;

/// Print just the headline number from the output.
///
/// Looks for the key dashboard figures in priority order, then falls back
/// to the first field of the result object.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "hhi",
        "closing_balance",
        "effective_streams",
        "level",
    ];

    if let Value::Object(map) = result {
        // Period summaries: lead with actual EBITDA.
        if let Some(ebitda) = map.get("actual").and_then(|a| a.get("ebitda")) {
            println!("{}", format_minimal(ebitda));
            return;
        }

        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    // Bridge output is an array; lead with the final step's end value.
    if let Value::Array(rows) = result {
        if let Some(last) = rows.last() {
            let end = last.get("end").unwrap_or(last);
            println!("{}", format_minimal(end));
            return;
        }
    }

    println!("{}", format_minimal(result));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
