use crate::document::{Document, DocumentFormat};
use crate::error::DocumentError;
use crate::properties;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

impl DocumentFormat {
    /// Detect the format from a file name: `.properties` or `.json`
    pub fn from_file_name(file_name: &str) -> Result<Self, DocumentError> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".properties") {
            Ok(DocumentFormat::Flat)
        } else if lower.ends_with(".json") {
            Ok(DocumentFormat::Json)
        } else {
            Err(DocumentError::UnsupportedFileType(file_name.to_string()))
        }
    }
}

/// Parse raw file text in the given format
pub fn parse(raw: &str, format: DocumentFormat) -> Result<Document, DocumentError> {
    match format {
        DocumentFormat::Flat => Ok(Document::flat(properties::parse(raw)?)),
        DocumentFormat::Json => {
            let value: Value = serde_json::from_str(raw)
                .map_err(|e| DocumentError::InvalidJson(e.to_string()))?;
            Document::json(value).ok_or(DocumentError::InvalidRoot)
        }
    }
}

/// Serialize a document back to its own format.
///
/// Flat documents become `key=value` lines; JSON documents are pretty
/// printed with two-space indentation and a trailing newline.
pub fn serialize(document: &Document) -> String {
    match document.format() {
        DocumentFormat::Flat => properties::serialize(document.entries()),
        DocumentFormat::Json => {
            let mut content = serde_json::to_string_pretty(&document.to_json_value())
                .unwrap_or_else(|_| String::from("{}"));
            content.push('\n');
            content
        }
    }
}

/// Load a localization file, picking the format from its extension
///
/// # Errors
/// - Unsupported extension
/// - File read errors
/// - Invalid JSON or `.properties` content
pub fn load_document_from_file(path: &Path) -> Result<Document, DocumentError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let format = DocumentFormat::from_file_name(file_name)?;

    let content = fs::read_to_string(path).map_err(|e| DocumentError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let document = parse(&content, format)?;
    debug!("Loaded {} as {:?}", path.display(), format);
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Node;
    use serde_json::json;

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(DocumentFormat::from_file_name("app.properties"), Ok(DocumentFormat::Flat));
        assert_eq!(DocumentFormat::from_file_name("Messages.JSON"), Ok(DocumentFormat::Json));
        let err = DocumentFormat::from_file_name("notes.txt").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported file type. Please select a .properties or .json file."
        );
    }

    #[test]
    fn test_parse_flat() {
        let doc = parse("a=Hello\nb=World\n", DocumentFormat::Flat).unwrap();
        assert_eq!(doc.entries().collect::<Vec<_>>(), vec![("a", "Hello"), ("b", "World")]);
    }

    #[test]
    fn test_parse_json() {
        let doc = parse(r#"{"a": "hello", "b": {"c": "world"}}"#, DocumentFormat::Json).unwrap();
        assert_eq!(doc.root(), &Node::from(json!({"a": "hello", "b": {"c": "world"}})));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse("{not json", DocumentFormat::Json),
            Err(DocumentError::InvalidJson(_))
        ));
        assert_eq!(parse("\"text\"", DocumentFormat::Json), Err(DocumentError::InvalidRoot));
    }

    #[test]
    fn test_serialize_flat() {
        let doc = Document::flat([("greeting", "Hola"), ("farewell", "Adiós")]);
        assert_eq!(serialize(&doc), "greeting=Hola\nfarewell=Adiós\n");
    }

    #[test]
    fn test_flat_document_survives_serialize_and_parse() {
        let doc = Document::flat([
            ("msg", "Line one\nLine two"),
            ("path", "C:\\temp\\"),
            ("key:with=seps", " padded"),
        ]);
        let reparsed = parse(&serialize(&doc), DocumentFormat::Flat).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn test_serialize_json_is_indented_and_ordered() {
        let doc = parse(r#"{"z": "1", "a": {"b": [1, "x"]}}"#, DocumentFormat::Json).unwrap();
        let expected = "{\n  \"z\": \"1\",\n  \"a\": {\n    \"b\": [\n      1,\n      \"x\"\n    ]\n  }\n}\n";
        assert_eq!(serialize(&doc), expected);
    }

    #[test]
    fn test_load_unsupported_file() {
        let result = load_document_from_file(Path::new("strings.yaml"));
        assert!(matches!(result, Err(DocumentError::UnsupportedFileType(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_document_from_file(Path::new("/nonexistent/dir/app.json"));
        assert!(matches!(result, Err(DocumentError::Io { .. })));
    }
}
