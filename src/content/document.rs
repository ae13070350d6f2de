//! Wire shapes of the content API
//!
//! Everything here decodes leniently: fields that are missing, `null`, or
//! shaped unexpectedly fall back to empty values instead of failing the
//! whole response.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Body of `GET <endpoint>`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiInfo {
    #[serde(default)]
    pub refs: Vec<ApiRef>,
}

impl ApiInfo {
    /// The ref pointing at published content
    pub fn master_ref(&self) -> Option<&str> {
        self.refs
            .iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiRef {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

/// Body of `GET <endpoint>/documents/search` and of every `next_page` URL
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Document>,
    #[serde(default)]
    pub next_page: Option<String>,
}

/// One document from the repository
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub slugs: Vec<String>,
    #[serde(default)]
    pub last_publication_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub data: PostFields,
}

impl Document {
    /// `uid` when set, otherwise the first entry of `slugs`
    pub fn slug(&self) -> String {
        self.uid
            .as_deref()
            .filter(|uid| !uid.is_empty())
            .or_else(|| self.slugs.first().map(String::as_str))
            .unwrap_or_default()
            .to_string()
    }
}

/// The `data` object of a post document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFields {
    #[serde(default)]
    pub title: RichText,
    #[serde(default)]
    pub subtitle: RichText,
    #[serde(default)]
    pub author: RichText,
    #[serde(default, deserialize_with = "lenient")]
    pub banner: Banner,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Vec<ContentGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Banner {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// One entry of the `content` group field
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentGroup {
    #[serde(default)]
    pub heading: RichText,
    #[serde(default)]
    pub body: RichText,
}

/// A rich-text field reduced to the text of its blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText(pub Vec<String>);

impl RichText {
    /// Text of the first block, or empty
    pub fn first_text(&self) -> String {
        self.0.first().cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for RichText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(RichText::from_value(&value))
    }
}

impl RichText {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => RichText(vec![text.clone()]),
            Value::Array(blocks) => RichText(blocks.iter().map(block_text).collect()),
            Value::Object(_) => RichText(vec![block_text(value)]),
            _ => RichText::default(),
        }
    }
}

fn block_text(block: &Value) -> String {
    match block {
        Value::String(text) => text.clone(),
        Value::Object(map) => map
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

/// Decode `T`, or fall back to its default when the value has the wrong shape
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
