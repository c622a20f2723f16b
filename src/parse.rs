use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::models::{SearchItem, VacancyDetail, VacancyResponse, VacancySummary};

static MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"));

// Matched against the lowercased description. `$` is end of text only.
static CONDITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)условия(.*?)(?:<strong>|$)").expect("condition pattern is valid"));

const MISSING: &str = "NaN";

/// Removes every `<...>` token. Entities are left as they are.
pub fn strip_markup(text: &str) -> String {
    MARKUP_RE.replace_all(text, "").into_owned()
}

/// Cuts the work conditions out of a vacancy description.
///
/// Takes everything after the first "условия" up to the next `<strong>` section header
/// (or the end of the text), strips markup and trims leading colons and spaces.
/// The result is lowercase. Trailing whitespace is kept.
/// Returns an empty string when the description has no conditions section.
pub fn extract_condition(description: &str) -> String {
    let lowered = description.to_lowercase();
    let Some(caps) = CONDITION_RE.captures(&lowered) else {
        return String::new();
    };
    let section = caps.get(1).map_or("", |m| m.as_str());
    strip_markup(section)
        .trim_start_matches([':', ' '])
        .to_string()
}

/// Replaces the `;` field separator so it can't appear inside a field.
pub fn sanitize(text: &str) -> String {
    text.replace(';', " ")
}

/// Pulls the requirement/responsibility snippets and the id out of a search item.
pub fn summarize(item: &SearchItem) -> VacancySummary {
    let (requirement, responsibility) = match &item.snippet {
        Some(snippet) if !snippet.is_empty() => {
            let field = |key: &str| {
                let text = snippet.get(key).and_then(Value::as_str).unwrap_or(MISSING);
                Some(sanitize(text))
            };
            (field("requirement"), field("responsibility"))
        }
        _ => (None, None),
    };

    VacancySummary {
        requirement,
        responsibility,
        vacancy_id: item.id.clone(),
    }
}

/// Flattens a detail response. Yields the empty projection when there is no
/// response or the API rejected the id.
pub fn project_detail(response: Option<&VacancyResponse>) -> VacancyDetail {
    let Some(vacancy) = response.filter(|v| !v.is_rejected()) else {
        return VacancyDetail::default();
    };

    let key_skills = vacancy
        .key_skills
        .iter()
        .map(|skill| skill.name.as_str())
        .collect::<Vec<_>>()
        .join(",");

    VacancyDetail {
        title: sanitize(vacancy.name.as_deref().unwrap_or(MISSING)),
        experience: vacancy
            .experience
            .as_ref()
            .and_then(|e| e.id.clone())
            .unwrap_or_default(),
        key_skills: sanitize(&key_skills),
        description: sanitize(vacancy.description.as_deref().unwrap_or(MISSING)),
    }
}
