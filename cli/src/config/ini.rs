//! Minimal INI reader for `config-deploy.conf`.
//!
//! Accepts `key = value` and `key: value` entries grouped under `[section]`
//! headers. Keys are lowercased; section names keep their case, so only a
//! literal `[DEFAULT]` header is the default section. Whole-line comments
//! start with `#` or `;`. Values are kept verbatim apart from surrounding
//! whitespace, so a `#` inside a path is not treated as a comment.

use anyhow::{Result, bail};

/// Name of the section whose entries feed the resolver.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A key-value section.
///
/// # Examples
///
/// ```
/// use react_tools::config::ini::KvSection;
///
/// let section = KvSection {
///     header: "DEFAULT".to_string(),
///     entries: vec![("source".to_string(), "./export".to_string())],
/// };
/// assert_eq!(section.get("source"), Some("./export"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvSection {
    /// The raw section header (e.g., `"DEFAULT"`).
    pub header: String,
    /// Key-value entries within this section, in file order.
    pub entries: Vec<(String, String)>,
}

impl KvSection {
    /// Return the last value recorded for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse INI content into sections.
///
/// # Examples
///
/// ```
/// use react_tools::config::ini::parse_kv_sections_from_str;
///
/// let sections = parse_kv_sections_from_str(
///     "[DEFAULT]\nsource = ./export\nTarget: ./site\n"
/// ).unwrap();
/// assert_eq!(sections[0].header, "DEFAULT");
/// assert_eq!(sections[0].get("target"), Some("./site"));
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - An entry appears before any section header
/// - A line is neither a header, a comment nor a `key = value` pair
pub fn parse_kv_sections_from_str(content: &str) -> Result<Vec<KvSection>> {
    let mut sections = Vec::new();
    let mut current: Option<KvSection> = None;

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if let Some(header) = parse_raw_header(trimmed) {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            current = Some(KvSection {
                header,
                entries: Vec::new(),
            });
        } else if let Some(ref mut section) = current {
            if let Some((key, value)) = parse_kv_line(trimmed) {
                section.entries.push((key, value));
            } else {
                bail!(
                    "invalid key-value pair at line {}: {}",
                    line_num + 1,
                    trimmed
                );
            }
        } else {
            bail!(
                "entry outside of section at line {}: {}",
                line_num + 1,
                trimmed
            );
        }
    }

    if let Some(section) = current {
        sections.push(section);
    }

    Ok(sections)
}

/// Collect the entries of every `[DEFAULT]` section, later ones winning.
///
/// # Errors
///
/// Returns an error if the content cannot be parsed.
pub fn default_entries(content: &str) -> Result<KvSection> {
    let mut merged = KvSection {
        header: DEFAULT_SECTION.to_string(),
        entries: Vec::new(),
    };
    for section in parse_kv_sections_from_str(content)? {
        if section.header == DEFAULT_SECTION {
            merged.entries.extend(section.entries);
        }
    }
    Ok(merged)
}

/// Interpret an INI boolean (`1/yes/true/on`, `0/no/false/off`).
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Extract a header name from `[...]`, preserving case.
fn parse_raw_header(line: &str) -> Option<String> {
    line.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(|inner| inner.trim().to_string())
}

/// Split `key = value` or `key: value` at the first delimiter.
fn parse_kv_line(line: &str) -> Option<(String, String)> {
    let idx = line.find(['=', ':'])?;
    let (key, rest) = line.split_at(idx);
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = rest.get(1..).unwrap_or_default().trim();
    Some((key.to_lowercase(), value.to_string()))
}
