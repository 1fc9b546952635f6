//! The blog-post payload submitted to the content API.

use serde::{Deserialize, Serialize};

/// Server-side representation of a created post. The schema belongs to the
/// remote service, so it is kept as an untyped JSON value.
pub type ContentResource = sonic_rs::Value;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    #[default]
    Published,
}

/// A citation attached to a post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
    /// Free-form label such as `"book"` or `"article"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Source {
    pub fn new(title: impl Into<String>, url: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            kind: kind.into(),
            author: None,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// One post to submit. Field order is the wire order.
///
/// `title`, `body` and `category` are required by the service; they are not
/// validated locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub title: String,
    pub body: String,
    pub category: String,
    #[serde(default)]
    pub status: ContentStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl ContentRecord {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            category: category.into(),
            status: ContentStatus::default(),
            tags: Vec::new(),
            sources: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: ContentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_sources(mut self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources.extend(sources);
        self
    }

    /// JSON request body.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, sonic_rs::Error> {
        sonic_rs::to_vec(self)
    }
}
