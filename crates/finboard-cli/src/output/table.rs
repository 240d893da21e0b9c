use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Render the computation envelope as tables: scalar fields as a two-column
/// table, each nested array of objects (variances, bridge steps, months) as
/// its own row table, then warnings and methodology as a footer.
pub fn print_table(value: &Value) {
    let envelope = value.as_object();
    let result = envelope
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            print_scalars(map);
            for (key, val) in map {
                if let Value::Array(rows) = val {
                    if rows.iter().any(|r| r.is_object()) {
                        println!("\n{}:", key);
                        print_rows(rows);
                    }
                }
            }
        }
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", other),
    }

    if let Some(env) = envelope {
        if let Some(Value::Array(warnings)) = env.get("warnings") {
            if !warnings.is_empty() {
                println!("\nWarnings:");
                for w in warnings {
                    if let Value::String(s) = w {
                        println!("  - {}", s);
                    }
                }
            }
        }
        if let Some(Value::String(method)) = env.get("methodology") {
            println!("\nMethodology: {}", method);
        }
    }
}

/// Two-column field/value table of the non-array fields, flattening one
/// level of nested objects (e.g. actual.revenue).
fn print_scalars(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut any = false;
    for (key, val) in map {
        match val {
            Value::Array(_) => continue,
            Value::Object(inner) => {
                for (inner_key, inner_val) in inner {
                    builder.push_record([
                        format!("{}.{}", key, inner_key),
                        render(inner_val),
                    ]);
                    any = true;
                }
            }
            _ => {
                builder.push_record([key.clone(), render(val)]);
                any = true;
            }
        }
    }
    if any {
        println!("{}", Table::from(builder));
    }
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            println!("{}", render(row));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in rows {
        if let Value::Object(map) = row {
            builder.push_record(
                headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(render).unwrap_or_default())
                    .collect::<Vec<String>>(),
            );
        }
    }
    println!("{}", Table::from(builder));
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
