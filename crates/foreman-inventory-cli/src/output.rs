//! JSON rendering for stdout

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Write `value` as JSON with sorted keys and four-space indentation,
/// followed by a newline
///
/// # Errors
/// Returns error if serialization or writing fails.
pub fn write_json<W: Write, T: Serialize>(mut writer: W, value: &T) -> io::Result<()> {
    // going through `Value` sorts every object's keys
    let value = serde_json::to_value(value)?;
    {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut writer, formatter);
        value.serialize(&mut serializer)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn render<T: Serialize>(value: &T) -> String {
        let mut buf = Vec::new();
        write_json(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_indent_and_trailing_newline() {
        let value = serde_json::json!({"web": ["a", "b"]});
        assert_eq!(
            render(&value),
            "{\n    \"web\": [\n        \"a\",\n        \"b\"\n    ]\n}\n"
        );
    }

    #[test]
    fn test_keys_sorted() {
        let mut map = HashMap::new();
        map.insert("zeta", 1);
        map.insert("alpha", 2);
        map.insert("_meta", 3);
        assert_eq!(
            render(&map),
            "{\n    \"_meta\": 3,\n    \"alpha\": 2,\n    \"zeta\": 1\n}\n"
        );
    }

    #[test]
    fn test_empty_object() {
        let value = serde_json::Map::new();
        assert_eq!(render(&value), "{}\n");
    }
}
