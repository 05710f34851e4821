//! Serialization of converted objects

use crate::transform::{Object, Value, ValueMap};

use super::escape::{escape, EscapePolicy};

/// Build the output document one object statement at a time
pub struct ObjectWriter {
    policy: EscapePolicy,
    out: String,
    count: usize,
}

impl ObjectWriter {
    pub fn new(policy: EscapePolicy) -> Self {
        Self {
            policy,
            out: String::new(),
            count: 0,
        }
    }

    /// Number of statements written so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Append one `object` statement followed by a blank line
    pub fn write_object(&mut self, object: &Object) {
        let mut line = String::new();
        for (enabled, keyword) in [
            (object.is_abstract, "abstract"),
            (object.local, "local"),
            (object.temporary, "temporary"),
        ] {
            if enabled {
                line.push_str(keyword);
                line.push(' ');
            }
        }

        line.push_str(&format!(
            "object {} {}",
            object.object_type,
            quote(&object.name, EscapePolicy::Minimal)
        ));

        if !object.parents.is_empty() {
            let parents = object
                .parents
                .iter()
                .map(|parent| quote(parent, EscapePolicy::Minimal))
                .collect::<Vec<_>>()
                .join(", ");
            line.push_str(&format!(" inherits {}", parents));
        }

        line.push(' ');
        self.out.push_str(&line);
        write_map(&mut self.out, &object.properties, 0, self.policy);
        self.out.push_str("\n\n");
        self.count += 1;
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Render a single object statement
pub fn render_object(object: &Object, policy: EscapePolicy) -> String {
    let mut writer = ObjectWriter::new(policy);
    writer.write_object(object);
    writer.finish()
}

fn quote(value: &str, policy: EscapePolicy) -> String {
    format!("\"{}\"", escape(value, policy))
}

fn indent(out: &mut String, depth: usize) {
    out.push_str(&"\t".repeat(depth));
}

fn write_map(out: &mut String, map: &ValueMap, depth: usize, policy: EscapePolicy) {
    out.push_str("{\n");
    for (key, item) in map.iter() {
        indent(out, depth + 1);
        let op = if item.is_compound() { "+=" } else { "=" };
        out.push_str(&format!("{} {} ", key, op));
        write_value(out, item, depth + 1, policy);
        out.push_str(",\n");
    }
    indent(out, depth);
    out.push('}');
}

fn write_value(out: &mut String, value: &Value, depth: usize, policy: EscapePolicy) {
    match value {
        Value::String(s) => out.push_str(&quote(s, policy)),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Map(map) => write_map(out, map, depth, policy),
        Value::List(items) => {
            out.push_str("{\n");
            for item in items {
                indent(out, depth + 1);
                write_value(out, item, depth + 1, policy);
                out.push_str(",\n");
            }
            indent(out, depth);
            out.push('}');
        }
    }
}
