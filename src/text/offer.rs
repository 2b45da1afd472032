use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::normalize_text;

/// A structured job offer. Every field is optional; unknown fields are ignored.
///
/// Scalar fields accept any JSON value. `null`, `""`, `0`, `false` and empty
/// lists or objects count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferRecord {
    pub id: Option<Value>,
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub company: Option<Value>,
    pub salary: Option<Value>,
    pub contract: Option<Value>,
    pub location: Option<Value>,
    pub work: Option<Value>,
    pub experience: Option<Value>,
    pub programming: Option<Value>,
    pub languages: Option<Value>,
    pub tools: Option<Value>,
    pub diplomas: Option<Value>,
    pub keywords: Option<Value>,
}

/// An offer as accepted by the scoring operations: free text or a structured record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OfferInput {
    Text(String),
    Record(OfferRecord),
}

impl From<OfferRecord> for OfferInput {
    fn from(record: OfferRecord) -> Self {
        Self::Record(record)
    }
}

impl From<&str> for OfferInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for OfferInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl OfferInput {
    /// Offer id stringified, when the offer is a record with a non-null `id`.
    pub fn id(&self) -> Option<String> {
        match self {
            Self::Record(record) => record.id.as_ref().filter(|v| !v.is_null()).map(display),
            Self::Text(_) => None,
        }
    }

    /// Text fed to the local encoder.
    pub fn job_text(&self) -> String {
        match self {
            Self::Text(text) => normalize_text(text),
            Self::Record(record) => record.job_text(),
        }
    }

    /// Text embedded in the remote scoring prompt.
    pub fn prompt_text(&self) -> String {
        match self {
            Self::Text(text) => normalize_text(text),
            Self::Record(record) => record.prompt_text(),
        }
    }
}

impl OfferRecord {
    /// Convenience constructor used by callers that only know a title.
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(Value::String(title.to_string())),
            ..Default::default()
        }
    }

    fn scalar(&self, key: &str) -> Option<&Value> {
        let value = match key {
            "title" => &self.title,
            "description" => &self.description,
            "company" => &self.company,
            "salary" => &self.salary,
            "contract" => &self.contract,
            "location" => &self.location,
            "work" => &self.work,
            "experience" => &self.experience,
            "programming" => &self.programming,
            "languages" => &self.languages,
            "tools" => &self.tools,
            "diplomas" => &self.diplomas,
            "keywords" => &self.keywords,
            _ => &None,
        };
        value.as_ref().filter(|v| is_truthy(v))
    }

    fn list(&self, key: &str) -> Option<String> {
        match self.scalar(key)? {
            Value::Array(items) => Some(items.iter().map(display).collect::<Vec<_>>().join(", ")),
            _ => None,
        }
    }

    /// Scalar fields in order, then list fields joined with `", "`; parts joined by `" \n "`.
    pub fn job_text(&self) -> String {
        let mut parts: Vec<String> = [
            "title",
            "description",
            "company",
            "salary",
            "contract",
            "location",
            "work",
            "experience",
        ]
        .into_iter()
        .filter_map(|key| self.scalar(key).map(display))
        .collect();

        parts.extend(
            ["programming", "languages", "tools", "diplomas", "keywords"]
                .into_iter()
                .filter_map(|key| self.list(key)),
        );

        normalize_text(&parts.join(" \n "))
    }

    /// `"Title: value"` lines, then `"Keywords: a, b"` list lines.
    pub fn prompt_text(&self) -> String {
        let mut parts: Vec<String> = ["title", "description", "company", "salary", "experience"]
            .into_iter()
            .filter_map(|key| {
                self.scalar(key)
                    .map(|v| format!("{}: {}", capitalize(key), display(v)))
            })
            .collect();

        parts.extend(
            ["keywords", "programming", "tools", "languages"]
                .into_iter()
                .filter_map(|key| self.list(key).map(|v| format!("{}: {}", capitalize(key), v))),
        );

        normalize_text(&parts.join("\n"))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
