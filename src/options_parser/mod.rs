use std::fs;
use std::path::Path;
use thiserror::Error;

/// Error type for options lookups and file handling.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read or write the options file: {0}")]
    Io(#[from] std::io::Error),
    /// The requested key is not present in the map. Callers that have a
    /// default for the setting should treat this as "use the default".
    #[error("no such option: {0}")]
    KeyNotFound(String),
    /// The key exists but its value does not convert to the requested type.
    #[error("value of option `{key}` is not a valid {expected}: `{value}`")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        value: String,
    },
}

/// A line the parser could not interpret and skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseWarning {
    /// 1-based line number in the input.
    pub line: usize,
    /// The offending line, as found in the file.
    pub text: String,
}

/// An ordered map of `options.txt` settings.
///
/// Keys keep the order of their first occurrence in the input; a duplicate
/// key later in the file overwrites the value but not the position. Values
/// are stored as raw text and only interpreted when a typed accessor is
/// called, so a key the launcher has never seen cannot break parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsMap {
    entries: Vec<(String, String)>,
    warnings: Vec<ParseWarning>,
}

impl OptionsMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options text into an `OptionsMap`.
    ///
    /// Each non-empty, non-comment (`#`) line is split on the first `:` into
    /// a trimmed key and value; the value may itself contain colons. Lines
    /// without a separator, or with an empty key, are skipped and recorded
    /// in [`warnings`](Self::warnings) rather than failing the parse; real
    /// option files accumulate stray vendor lines, and the parser's job is
    /// maximal recovery.
    pub fn parse(content: &str) -> Self {
        let mut map = Self::new();
        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once(':') {
                Some((key, value)) if !key.trim().is_empty() => {
                    map.set(key.trim(), value.trim());
                }
                _ => map.warnings.push(ParseWarning {
                    line: index + 1,
                    text: raw_line.to_string(),
                }),
            }
        }
        map
    }

    /// The warnings recorded while parsing, one per skipped line.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Returns the raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `key` to `value`, updating an existing entry in place (its
    /// position is preserved) or appending a new entry at the end.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    /// Removes `key`, returning its raw value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of settings in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no settings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Reads `key` as a boolean. Accepts `true`/`false`, with or without
    /// surrounding double quotes (newer game versions quote values).
    pub fn get_bool(&self, key: &str) -> Result<bool, OptionsError> {
        let value = self.require(key)?;
        match unquote(value) {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(self.mismatch(key, "boolean", value)),
        }
    }

    /// Reads `key` as a 64-bit integer.
    pub fn get_int(&self, key: &str) -> Result<i64, OptionsError> {
        let value = self.require(key)?;
        value
            .parse()
            .map_err(|_| self.mismatch(key, "integer", value))
    }

    /// Reads `key` as a 64-bit float.
    pub fn get_float(&self, key: &str) -> Result<f64, OptionsError> {
        let value = self.require(key)?;
        value.parse().map_err(|_| self.mismatch(key, "float", value))
    }

    /// Reads `key` as a comma-separated list. A surrounding `[...]` is
    /// stripped, items are trimmed and unquoted. An empty value is an empty
    /// list, not an error.
    pub fn get_list(&self, key: &str) -> Result<Vec<String>, OptionsError> {
        let value = self.require(key)?;
        let inner = value
            .strip_prefix('[')
            .and_then(|v| v.strip_suffix(']'))
            .unwrap_or(value);
        if inner.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(inner
            .split(',')
            .map(|item| unquote(item.trim()).to_string())
            .collect())
    }

    /// Reads `key` as one of a fixed set of variants, returning the matched
    /// variant. Quotes around the stored value are ignored.
    pub fn get_enum(&self, key: &str, allowed: &[&str]) -> Result<String, OptionsError> {
        let value = self.require(key)?;
        let unquoted = unquote(value);
        allowed
            .iter()
            .find(|variant| **variant == unquoted)
            .map(|variant| variant.to_string())
            .ok_or_else(|| self.mismatch(key, "enum variant", value))
    }

    /// Serializes the map back to options text, one `key:value` line per
    /// entry in insertion order. Parsing the result yields an equal map.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push(':');
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    fn require(&self, key: &str) -> Result<&str, OptionsError> {
        self.get(key)
            .ok_or_else(|| OptionsError::KeyNotFound(key.to_string()))
    }

    fn mismatch(&self, key: &str, expected: &'static str, value: &str) -> OptionsError {
        OptionsError::TypeMismatch {
            key: key.to_string(),
            expected,
            value: value.to_string(),
        }
    }
}

/// Reads an options file and parses its contents.
///
/// # Arguments
///
/// * `path` - The file path to read.
///
/// # Errors
///
/// Returns `OptionsError::Io` if the file cannot be read. Parsing itself
/// cannot fail; unreadable lines end up in [`OptionsMap::warnings`].
pub fn parse_options_file<P: AsRef<Path>>(path: P) -> Result<OptionsMap, OptionsError> {
    let content = fs::read_to_string(path)?;
    Ok(OptionsMap::parse(&content))
}

/// Writes the map back to an options file, replacing its contents.
///
/// # Errors
///
/// Returns `OptionsError::Io` if the file cannot be written.
pub fn write_options_file<P: AsRef<Path>>(path: P, map: &OptionsMap) -> Result<(), OptionsError> {
    fs::write(path, map.serialize())?;
    Ok(())
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
