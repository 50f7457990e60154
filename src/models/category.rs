use std::fmt;

use serde::{Deserialize, Serialize};

/// Which resolution step produced a conversation's category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategorySource {
    Override,
    ContentKeywords,
    TitleKeywords,
    Fallback,
}

impl CategorySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategorySource::Override => "override",
            CategorySource::ContentKeywords => "content-keywords",
            CategorySource::TitleKeywords => "title-keywords",
            CategorySource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for CategorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAssignment {
    pub conversation_id: String,
    pub category: String,
    pub source: CategorySource,
}
