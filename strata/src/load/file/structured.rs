//! Flattening of TOML and JSON documents into dotted names.

use figment::{
    Figment,
    providers::{Format as _, Json, Toml},
};
use serde_json::Value;

/// Structured document formats.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Format {
    Toml,
    Json,
}

/// One leaf of a flattened document.
#[derive(Clone, Debug, PartialEq)]
pub(super) enum Entry {
    /// A scalar rendered as text, `None` for null.
    Value(String, Option<String>),
    /// A leaf no property can hold.
    Unsupported(String, &'static str),
}

/// Parses `text` and lists its leaves in key order.
///
/// Nested tables join their keys with `.`; scalars are rendered as text so
/// that they go through the same parsing as any other loader's input.
pub(super) fn flatten(format: Format, text: &str) -> Result<Vec<Entry>, Box<figment::Error>> {
    let figment = match format {
        Format::Toml => Figment::from(Toml::string(text)),
        Format::Json => Figment::from(Json::string(text)),
    };
    let document: Value = figment.extract().map_err(Box::new)?;
    let mut entries = Vec::new();
    walk(None, &document, &mut entries);
    Ok(entries)
}

fn walk(prefix: Option<&str>, value: &Value, entries: &mut Vec<Entry>) {
    let key = || prefix.unwrap_or_default().to_owned();
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                let path = prefix.map_or_else(|| name.clone(), |p| format!("{p}.{name}"));
                walk(Some(&path), child, entries);
            }
        }
        Value::Null => entries.push(Entry::Value(key(), None)),
        Value::String(text) => entries.push(Entry::Value(key(), Some(text.clone()))),
        Value::Bool(flag) => entries.push(Entry::Value(key(), Some(flag.to_string()))),
        Value::Number(number) => entries.push(Entry::Value(key(), Some(number.to_string()))),
        Value::Array(_) => entries.push(Entry::Unsupported(key(), "arrays are not supported")),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for document flattening.

    use super::{Entry, Format, flatten};

    fn value(key: &str, raw: &str) -> Entry {
        Entry::Value(key.to_owned(), Some(raw.to_owned()))
    }

    #[test]
    fn flattens_nested_toml_tables() {
        let text = "[app.Server]\nPORT = 80\nHOST = \"example.org\"\n";
        let entries = flatten(Format::Toml, text).expect("valid toml");
        assert_eq!(
            entries,
            vec![
                value("app.Server.HOST", "example.org"),
                value("app.Server.PORT", "80"),
            ]
        );
    }

    #[test]
    fn json_null_is_explicit() {
        let entries = flatten(Format::Json, r#"{"a": {"B": null}}"#).expect("valid json");
        assert_eq!(entries, vec![Entry::Value("a.B".to_owned(), None)]);
    }

    #[test]
    fn arrays_are_unsupported() {
        let entries = flatten(Format::Json, r#"{"list": [1, 2]}"#).expect("valid json");
        let expected = Entry::Unsupported("list".to_owned(), "arrays are not supported");
        assert_eq!(entries, vec![expected]);
    }

    #[test]
    fn malformed_documents_are_errors() {
        assert!(flatten(Format::Toml, "a = = 1").is_err());
    }
}
