use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of stored document. Each kind lives under its own base directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Post,
    Article,
    ArticleTeaser,
    /// Projection of stored articles, never persisted as such
    LastArticles,
    News,
}

impl ContentType {
    pub fn base_dir(&self) -> &'static str {
        match self {
            ContentType::Post => "posts",
            ContentType::Article => "articles",
            ContentType::ArticleTeaser => "teasers",
            ContentType::LastArticles => "articles",
            ContentType::News => "news",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ContentType::Post => "POST",
            ContentType::Article => "ARTICLE",
            ContentType::ArticleTeaser => "ARTICLE_TEASER",
            ContentType::LastArticles => "LAST_ARTICLES",
            ContentType::News => "NEWS",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POST" => Ok(ContentType::Post),
            "ARTICLE" => Ok(ContentType::Article),
            "ARTICLE_TEASER" => Ok(ContentType::ArticleTeaser),
            "LAST_ARTICLES" => Ok(ContentType::LastArticles),
            "NEWS" => Ok(ContentType::News),
            _ => Err(format!("Unknown content type: {}", s)),
        }
    }
}
