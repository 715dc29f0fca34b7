use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a community news item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewsId(pub String);

impl fmt::Display for NewsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NewsId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsCategory {
    Health,
    Activity,
    Notice,
    General,
}

/// An item in the community news feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityNews {
    pub id: NewsId,
    pub title: String,
    pub body: String,
    pub category: NewsCategory,
    pub author: String,
    pub published_at: DateTime<Utc>,
}

impl CommunityNews {
    /// Case-insensitive keyword match over title and body
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.body.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let item = CommunityNews {
            id: NewsId::from("n1"),
            title: "Free Health Checkup".to_string(),
            body: "Blood pressure screening at the community center.".to_string(),
            category: NewsCategory::Health,
            author: "Community Office".to_string(),
            published_at: Utc::now(),
        };

        assert!(item.matches_keyword("health"));
        assert!(item.matches_keyword("BLOOD"));
        assert!(!item.matches_keyword("yoga"));
    }
}
