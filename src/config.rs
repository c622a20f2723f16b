use serde::{Deserialize, Serialize};

use crate::{BUCKET_THRESHOLD, DEFAULT_AREA, DEFAULT_BASE_URL, DEFAULT_COUNT, DEFAULT_QUERY};

/// Everything a single parsing run needs to know.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// API root, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Region code sent as the `area` parameter.
    #[serde(default = "default_area")]
    pub area: u32,
    /// Search text.
    #[serde(default = "default_query")]
    pub query: String,
    /// How many vacancies to parse. Clamped to what the API reports as found.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Above this many vacancies the search is split by experience.
    #[serde(default = "default_bucket_threshold")]
    pub bucket_threshold: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// How many of the most frequent n-grams the driver logs.
    #[serde(default = "default_top_ngrams")]
    pub top_ngrams: usize,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_area() -> u32 {
    DEFAULT_AREA
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

fn default_count() -> usize {
    DEFAULT_COUNT
}

fn default_bucket_threshold() -> usize {
    BUCKET_THRESHOLD
}

fn default_user_agent() -> String {
    concat!("hh-vacancies/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_top_ngrams() -> usize {
    10
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            area: default_area(),
            query: default_query(),
            count: default_count(),
            bucket_threshold: default_bucket_threshold(),
            user_agent: default_user_agent(),
            top_ngrams: default_top_ngrams(),
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_area(mut self, area: u32) -> Self {
        self.area = area;
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub fn with_bucket_threshold(mut self, threshold: usize) -> Self {
        self.bucket_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_top_ngrams(mut self, top: usize) -> Self {
        self.top_ngrams = top;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_run() {
        let config = ParserConfig::default();
        assert_eq!(config.base_url, "https://api.hh.ru");
        assert_eq!(config.area, 113);
        assert_eq!(config.query, "python");
        assert_eq!(config.count, 200);
        assert_eq!(config.bucket_threshold, 2000);
    }

    #[test]
    fn builder_trims_trailing_slash() {
        let config = ParserConfig::new()
            .with_base_url("http://127.0.0.1:1234/")
            .with_query("машинное обучение")
            .with_count(50);
        assert_eq!(config.base_url, "http://127.0.0.1:1234");
        assert_eq!(config.query, "машинное обучение");
        assert_eq!(config.count, 50);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ParserConfig = serde_json::from_str(r#"{"query": "rust"}"#).unwrap();
        assert_eq!(config.query, "rust");
        assert_eq!(config.area, 113);
        assert_eq!(config.top_ngrams, 10);
    }
}
