use crate::error::{Result, StoreError};

pub const DEFAULT_SEPARATOR: char = '-';

/// Turns a title into a file name: letters and digits are kept,
/// any other character becomes the separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleNormalizer {
    separator: char,
}

impl TitleNormalizer {
    /// Only the first character of `separator` is used
    pub fn new(separator: &str) -> Result<Self> {
        let separator = separator.chars().next().ok_or(StoreError::InvalidSeparator)?;
        Ok(Self { separator })
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn normalize(&self, title: &str) -> String {
        title.chars()
            .map(|c| if c.is_alphanumeric() { c } else { self.separator })
            .collect()
    }
}

impl Default for TitleNormalizer {
    fn default() -> Self {
        Self { separator: DEFAULT_SEPARATOR }
    }
}
