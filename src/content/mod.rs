use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

pub use content_type::ContentType;
pub use lang::Lang;

pub mod content_type;
pub mod lang;

/// One stored document, as read from `<title>.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(rename = "content", default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric: Option<String>,
    pub create_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ContentItem {
    /// Turns raw file text into an item of the requested type.
    /// `origin` names the source in error messages.
    pub fn deserialize(stringified: &str, content_type: ContentType, origin: &str) -> Result<ContentItem> {
        match content_type {
            ContentType::Post | ContentType::Article | ContentType::ArticleTeaser => Self::load(stringified, origin),
            ContentType::LastArticles => {
                let post = Self::load(stringified, origin)?;
                Ok(post.into_last_article())
            }
            other => Err(StoreError::UnsupportedType(other)),
        }
    }

    fn load(stringified: &str, origin: &str) -> Result<ContentItem> {
        serde_json::from_str(stringified).map_err(|source| StoreError::MalformedDocument {
            context: origin.to_string(),
            source,
        })
    }

    fn into_last_article(self) -> ContentItem {
        ContentItem {
            title: self.title,
            content_type: ContentType::LastArticles,
            body: None,
            rubric: None,
            create_date: self.create_date,
            link: self.link,
        }
    }
}
