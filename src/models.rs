use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::PER_PAGE;

/// Work experience ranges the search API can filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceBucket {
    NoExperience,
    Between1And3,
    Between3And6,
    MoreThan6,
}

impl ExperienceBucket {
    /// Every bucket, in the order large searches are split by.
    pub const ALL: [ExperienceBucket; 4] = [
        ExperienceBucket::NoExperience,
        ExperienceBucket::Between1And3,
        ExperienceBucket::Between3And6,
        ExperienceBucket::MoreThan6,
    ];

    /// Identifier expected by the `experience` query parameter.
    pub fn id(self) -> &'static str {
        match self {
            ExperienceBucket::NoExperience => "noExperience",
            ExperienceBucket::Between1And3 => "between1And3",
            ExperienceBucket::Between3And6 => "between3And6",
            ExperienceBucket::MoreThan6 => "moreThan6",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExperienceBucket::NoExperience => "Нет опыта",
            ExperienceBucket::Between1And3 => "От 1 года до 3 лет",
            ExperienceBucket::Between3And6 => "От 3 до 6 лет",
            ExperienceBucket::MoreThan6 => "Более 6 лет",
        }
    }
}

impl Serialize for ExperienceBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// Query string of one search page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub text: String,
    pub area: u32,
    pub page: usize,
    pub per_page: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceBucket>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, area: u32) -> Self {
        Self {
            text: text.into(),
            area,
            page: 0,
            per_page: PER_PAGE,
            specialization: None,
            experience: None,
        }
    }

    #[must_use]
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = Some(specialization.into());
        self
    }

    #[must_use]
    pub fn with_experience(mut self, experience: ExperienceBucket) -> Self {
        self.experience = Some(experience);
        self
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    /// Total matches for the query, ignoring pagination.
    pub found: usize,
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub id: Option<String>,
    /// Kept as a raw object: a key that is present but null still counts as a snippet.
    #[serde(default)]
    pub snippet: Option<Map<String, Value>>,
}

/// Full vacancy record as returned by the by-id endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VacancyResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub experience: Option<Experience>,
    #[serde(default)]
    pub key_skills: Vec<KeySkill>,
    #[serde(default)]
    pub description: Option<String>,
    /// Set by the API instead of the fields above when it rejects the id.
    #[serde(default)]
    pub errors: Option<Value>,
}

impl VacancyResponse {
    pub fn is_rejected(&self) -> bool {
        match &self.errors {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::Array(errors)) => !errors.is_empty(),
            Some(Value::Object(errors)) => !errors.is_empty(),
            Some(Value::String(errors)) => !errors.is_empty(),
            Some(Value::Number(_)) | Some(Value::Bool(true)) => true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeySkill {
    pub name: String,
}

/// Fields taken from a search result item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VacancySummary {
    pub requirement: Option<String>,
    pub responsibility: Option<String>,
    pub vacancy_id: Option<String>,
}

/// Flat projection of a [`VacancyResponse`]. All fields are empty when the detail
/// could not be fetched or was rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VacancyDetail {
    pub title: String,
    pub experience: String,
    pub key_skills: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VacancyRecord {
    pub vacancy_id: Option<String>,
    pub requirement: Option<String>,
    pub responsibility: Option<String>,
    pub title: String,
    pub experience: String,
    pub key_skills: String,
    /// Description with markup removed.
    pub description: String,
    /// Work conditions cut out of the description.
    pub condition: String,
}

impl VacancyRecord {
    pub fn new(summary: VacancySummary, detail: VacancyDetail, condition: String) -> Self {
        Self {
            vacancy_id: summary.vacancy_id,
            requirement: summary.requirement,
            responsibility: summary.responsibility,
            title: detail.title,
            experience: detail.experience,
            key_skills: detail.key_skills,
            description: detail.description,
            condition,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NGramEntry {
    pub count: usize,
    pub ngram: String,
}
