use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context as _;
use serde::de::DeserializeOwned;

use crate::foundation::error::{PrimkitError, PrimkitResult};
use crate::kitbash::flatten::flatten_into_plan;
use crate::kitbash::model::KitbashDocument;
use crate::scene::model::ScenePlan;

/// Parse JSON text, tolerating `/* ... */` and `// ...` comments.
///
/// Strict parsing is attempted first. If it fails, comments are stripped and parsing is retried;
/// if that also fails the error reported is the one from the strict attempt.
pub fn parse_json_lenient(text: &str) -> PrimkitResult<serde_json::Value> {
    let strict_err = match serde_json::from_str(text) {
        Ok(v) => return Ok(v),
        Err(e) => e,
    };

    let stripped = strip_json_comments(text);
    match serde_json::from_str(&stripped) {
        Ok(v) => {
            tracing::warn!("document needed comment stripping to parse");
            Ok(v)
        }
        Err(_) => Err(PrimkitError::serde(format!("parse JSON: {strict_err}"))),
    }
}

/// Deserialize a typed document from lenient JSON text.
pub fn from_str_lenient<T: DeserializeOwned>(text: &str) -> PrimkitResult<T> {
    let value = parse_json_lenient(text)?;
    serde_json::from_value(value).map_err(|e| PrimkitError::validation(format!("{e}")))
}

/// Remove C-style block comments and line comments outside of string literals.
///
/// Block comments become a single space so adjacent tokens stay separated; line comments are
/// dropped up to (not including) the newline. An unterminated block comment runs to the end.
pub fn strip_json_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    let mut in_string = false;

    while i < bytes.len() {
        let c = bytes[i];

        if in_string {
            out.push(c);
            if c == b'\\' && i + 1 < bytes.len() {
                out.push(bytes[i + 1]);
                i += 2;
                continue;
            }
            if c == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match (c, bytes.get(i + 1).copied()) {
            (b'"', _) => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            (b'/', Some(b'*')) => {
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    i += 1;
                }
                i = (i + 2).min(bytes.len());
                out.push(b' ');
            }
            (b'/', Some(b'/')) => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    // Only ASCII bytes were removed, so the remainder is still valid UTF-8.
    String::from_utf8(out).unwrap_or_default()
}

/// `true` when a document has the kitbash shape: some entry in `objects` carries a `parts` array.
pub fn is_kitbash_document(value: &serde_json::Value) -> bool {
    value
        .get("objects")
        .and_then(serde_json::Value::as_array)
        .is_some_and(|objs| objs.iter().any(|o| o.get("parts").is_some_and(|p| p.is_array())))
}

/// Load a scene plan from lenient JSON text, flattening kitbash-shaped documents.
pub fn load_plan_lenient(text: &str) -> PrimkitResult<ScenePlan> {
    let value = parse_json_lenient(text)?;
    if is_kitbash_document(&value) {
        let doc: KitbashDocument = serde_json::from_value(value)
            .map_err(|e| PrimkitError::validation(format!("kitbash document: {e}")))?;
        return Ok(flatten_into_plan(&doc, None));
    }
    serde_json::from_value(value)
        .map_err(|e| PrimkitError::validation(format!("scene plan document: {e}")))
}

/// Read a whole file as UTF-8 text.
pub fn read_text(path: impl AsRef<Path>) -> PrimkitResult<String> {
    let path = path.as_ref();
    let mut s = String::new();
    File::open(path)
        .and_then(|f| BufReader::new(f).read_to_string(&mut s))
        .with_context(|| format!("read document '{}'", path.display()))?;
    Ok(s)
}

impl ScenePlan {
    /// Parse a plan from a strict JSON reader.
    pub fn from_reader<R: Read>(r: R) -> PrimkitResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PrimkitError::serde(format!("parse scene plan JSON: {e}")))
    }

    /// Parse a plan from a file, tolerating comments and kitbash-shaped documents.
    pub fn from_path(path: impl AsRef<Path>) -> PrimkitResult<Self> {
        let text = read_text(path)?;
        load_plan_lenient(&text)
    }

    /// Serialize to the pretty-printed document format.
    pub fn to_json_pretty(&self) -> PrimkitResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PrimkitError::serde(format!("serialize scene plan: {e}")))
    }

    /// Write the pretty-printed document, creating parent directories.
    pub fn write_path(&self, path: impl AsRef<Path>) -> PrimkitResult<()> {
        let path = path.as_ref();
        let json = self.to_json_pretty()?;
        write_text(path, &json)
    }
}

/// Write text to `path`, creating parent directories as needed.
pub fn write_text(path: &Path, text: &str) -> PrimkitResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/document.rs"]
mod tests;
