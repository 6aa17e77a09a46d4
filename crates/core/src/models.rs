use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Anything the site filter can match on.
pub trait Titled {
    fn title(&self) -> Option<&str>;
}

/// One site as handed over by the host application.
///
/// Only `title` is interpreted; every other attribute (id, slug, ...) rides
/// along in `attributes` and is serialized back out untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl SiteRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            attributes: Map::new(),
        }
    }

    pub fn untitled() -> Self {
        Self {
            title: None,
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

impl Titled for SiteRecord {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Raw JSON objects are filterable too; a `title` that is not a string
/// counts as missing.
impl Titled for Map<String, Value> {
    fn title(&self) -> Option<&str> {
        self.get("title").and_then(|t| t.as_str())
    }
}

impl<T: Titled + ?Sized> Titled for &T {
    fn title(&self) -> Option<&str> {
        (**self).title()
    }
}
