use std::collections::HashMap;

use crate::content::{ContentType, Lang};

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    pub fn get_lang(&self, default: Lang) -> Result<Lang, String> {
        match self.items.get("lang") {
            None => Ok(default),
            Some(val) => val.parse(),
        }
    }

    pub fn get_type(&self, default: ContentType) -> Result<ContentType, String> {
        match self.items.get("type") {
            None => Ok(default),
            Some(val) => val.parse(),
        }
    }

    /// Required, between 1 and `max`
    pub fn get_limit(&self, max: usize) -> Result<usize, String> {
        let Some(val) = self.items.get("limit") else {
            return Err("Parameter limit is required".to_string());
        };
        match val.parse::<usize>() {
            Ok(limit) if (1..=max).contains(&limit) => Ok(limit),
            _ => Err(format!("Parameter limit must be between 1 and {}, got '{}'", max, val)),
        }
    }
}
