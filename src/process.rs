use chrono::Local;

use crate::config::ParserConfig;
use crate::log::Logger;
use crate::models::{
    ExperienceBucket, NGramEntry, SearchItem, SearchQuery, VacancyDetail, VacancyRecord,
};
use crate::ngram::freq_ngrams;
use crate::parse::{extract_condition, project_detail, strip_markup, summarize};
use crate::request::{get_vacancy_info, HhClient, VacancyApi};
use crate::{info_time, Result, PER_PAGE};

/// Everything one run produces.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub vacancies: Vec<VacancyRecord>,
    pub ngrams: Vec<NGramEntry>,
}

/// Builds the HTTP client and runs one search as described by `config`.
pub async fn process_site(config: ParserConfig, log: Logger) -> Result<ParseOutcome> {
    let api = HhClient::new(&config, log.clone())?;
    let parser = VacancyParser::new(api, config, log);
    let outcome = parser.parse_vacancies().await?;

    for entry in outcome.ngrams.iter().take(parser.config.top_ngrams) {
        info_time!(parser.log, "{:>5} : {}", entry.count, entry.ngram);
    }
    Ok(outcome)
}

/// How many vacancies will actually be parsed.
pub fn effective_count(count: usize, found: usize) -> usize {
    count.min(found)
}

/// Number of pages requested for `count` vacancies. Always at least one.
pub fn page_count(count: usize) -> usize {
    count / PER_PAGE + 1
}

pub struct VacancyParser<A> {
    api: A,
    config: ParserConfig,
    log: Logger,
}

impl<A: VacancyApi> VacancyParser<A> {
    pub fn new(api: A, config: ParserConfig, log: Logger) -> Self {
        Self { api, config, log }
    }

    /// Parses the configured query.
    pub async fn parse_vacancies(&self) -> Result<ParseOutcome> {
        self.parse(&self.config.query, self.config.count).await
    }

    /// Parses up to `count` vacancies for `text` and counts n-grams over their conditions.
    ///
    /// Any failed search page request aborts the whole run.
    /// When the count is above the bucket threshold the search is repeated for every
    /// experience bucket with the same number of pages. Buckets are not capped individually,
    /// so the result can hold more than `count` vacancies.
    pub async fn parse(&self, text: &str, count: usize) -> Result<ParseOutcome> {
        let start_time = Local::now();

        let first = self.api.search_page(&self.query(text)).await?;
        let found = first.found;
        let count = effective_count(count, found);
        info_time!(self.log, "Parsing {} vacancies out of {} found", count, found);

        let pages = page_count(count);
        let mut vacancies = Vec::with_capacity(count);

        if count > self.config.bucket_threshold {
            for bucket in ExperienceBucket::ALL {
                for page in 0..pages {
                    info_time!(
                        self.log,
                        "page {} of {}, experience: {}",
                        page,
                        pages,
                        bucket.label()
                    );
                    let query = self.query(text).with_page(page).with_experience(bucket);
                    let search = self.api.search_page(&query).await?;
                    vacancies.extend(self.vacancies_info(&search.items).await);
                }
            }
        } else {
            for page in 0..pages {
                info_time!(self.log, "page {} of {}", page + 1, pages);
                let search = self.api.search_page(&self.query(text).with_page(page)).await?;
                vacancies.extend(self.vacancies_info(&search.items).await);
            }
        }

        let conditions: Vec<&str> = vacancies.iter().map(|v| v.condition.as_str()).collect();
        let ngrams = freq_ngrams(&conditions);
        info_time!(
            self.log,
            start_time,
            "Parsed {} vacancies, {} distinct n-grams",
            vacancies.len(),
            ngrams.len()
        );

        Ok(ParseOutcome { vacancies, ngrams })
    }

    fn query(&self, text: &str) -> SearchQuery {
        SearchQuery::new(text, self.config.area)
    }

    /// Builds a record for every item on a page, one detail request at a time.
    async fn vacancies_info(&self, items: &[SearchItem]) -> Vec<VacancyRecord> {
        let mut records = Vec::with_capacity(items.len());
        for item in items {
            let summary = summarize(item);
            let mut detail = self.vacancy_detail(summary.vacancy_id.as_deref()).await;

            let condition = extract_condition(&detail.description);
            detail.description = strip_markup(&detail.description);
            records.push(VacancyRecord::new(summary, detail, condition));
        }
        records
    }

    async fn vacancy_detail(&self, id: Option<&str>) -> VacancyDetail {
        let Some(id) = id else {
            info_time!(self.log, "Search item without an id, skipping details");
            return VacancyDetail::default();
        };

        let Some(vacancy) = get_vacancy_info(&self.api, id, &self.log).await else {
            info_time!(self.log, "Nothing came back for vacancy {}", id);
            return VacancyDetail::default();
        };
        if vacancy.is_rejected() {
            info_time!(self.log, "ERROR the API rejected vacancy {}", id);
        }
        project_detail(Some(&vacancy))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{KeySkill, SearchPage, VacancyResponse};
    use crate::Error;

    /// Answers every search with `found` and one item per page, and records the queries.
    struct FakeApi {
        found: usize,
        fail_details: bool,
        searches: Mutex<Vec<(usize, Option<ExperienceBucket>)>>,
    }

    impl FakeApi {
        fn new(found: usize) -> Self {
            Self {
                found,
                fail_details: false,
                searches: Mutex::new(Vec::new()),
            }
        }

        fn searches(&self) -> Vec<(usize, Option<ExperienceBucket>)> {
            self.searches.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VacancyApi for FakeApi {
        async fn search_page(&self, query: &SearchQuery) -> Result<SearchPage> {
            assert_eq!(query.per_page, 100);
            self.searches
                .lock()
                .unwrap()
                .push((query.page, query.experience));

            let bucket = query.experience.map_or("all", ExperienceBucket::id);
            let item = serde_json::from_value(serde_json::json!({
                "id": format!("{bucket}-{}", query.page),
                "snippet": {"requirement": "Python", "responsibility": "ETL"}
            }))?;
            Ok(SearchPage {
                found: self.found,
                items: vec![item],
            })
        }

        async fn vacancy(&self, id: &str) -> Result<VacancyResponse> {
            if self.fail_details {
                let err = serde_json::from_str::<VacancyResponse>("{").unwrap_err();
                return Err(Error::Json(err));
            }
            Ok(VacancyResponse {
                name: Some(format!("Vacancy {id}")),
                key_skills: vec![KeySkill {
                    name: "Python".into(),
                }],
                description: Some(
                    "<p><strong>Условия:</strong> удалённая работа</p><strong>О нас</strong>"
                        .into(),
                ),
                ..Default::default()
            })
        }
    }

    fn parser(api: FakeApi) -> VacancyParser<FakeApi> {
        VacancyParser::new(api, ParserConfig::default(), Logger::new("test"))
    }

    #[test]
    fn count_is_clamped_to_found() {
        assert_eq!(effective_count(200, 150), 150);
        assert_eq!(effective_count(200, 5000), 200);
        assert_eq!(page_count(0), 1);
        assert_eq!(page_count(150), 2);
        assert_eq!(page_count(200), 3);
    }

    #[tokio::test]
    async fn pages_without_buckets() {
        let parser = parser(FakeApi::new(1000));
        let outcome = parser.parse("python", 250).await.unwrap();

        assert_eq!(
            parser.api.searches(),
            vec![(0, None), (0, None), (1, None), (2, None)]
        );
        let ids: Vec<_> = outcome
            .vacancies
            .iter()
            .map(|v| v.vacancy_id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["all-0", "all-1", "all-2"]);

        let record = &outcome.vacancies[0];
        assert_eq!(record.title, "Vacancy all-0");
        assert_eq!(record.requirement.as_deref(), Some("Python"));
        assert_eq!(record.description, "Условия: удалённая работаО нас");
        assert_eq!(record.condition, "удалённая работа");

        assert_eq!(outcome.ngrams[0].count, 3);
    }

    #[tokio::test]
    async fn small_found_limits_pages() {
        let parser = parser(FakeApi::new(120));
        parser.parse("python", 500).await.unwrap();
        assert_eq!(parser.api.searches(), vec![(0, None), (0, None), (1, None)]);
    }

    #[tokio::test]
    async fn large_counts_are_split_by_experience() {
        let parser = parser(FakeApi::new(10_000));
        let outcome = parser.parse("python", 2500).await.unwrap();

        let pages = page_count(2500);
        let expected: Vec<_> = std::iter::once((0, None))
            .chain(
                ExperienceBucket::ALL
                    .into_iter()
                    .flat_map(|b| (0..pages).map(move |p| (p, Some(b)))),
            )
            .collect();
        assert_eq!(parser.api.searches(), expected);
        assert_eq!(parser.api.searches().len(), 1 + 4 * 26);

        // Buckets are not capped: one item per (bucket, page) pair.
        assert_eq!(outcome.vacancies.len(), 4 * 26);
        assert_eq!(outcome.vacancies[0].vacancy_id.as_deref(), Some("noExperience-0"));
        assert_eq!(outcome.vacancies[26].vacancy_id.as_deref(), Some("between1And3-0"));
    }

    #[tokio::test]
    async fn threshold_comes_from_config() {
        let config = ParserConfig::default().with_bucket_threshold(100);
        let parser = VacancyParser::new(FakeApi::new(150), config, Logger::new("test"));
        parser.parse("python", 150).await.unwrap();
        assert_eq!(parser.api.searches().len(), 1 + 4 * 2);
    }

    #[tokio::test]
    async fn failed_detail_gives_empty_projection() {
        let mut api = FakeApi::new(1);
        api.fail_details = true;
        let parser = parser(api);
        let outcome = parser.parse("python", 200).await.unwrap();

        assert_eq!(outcome.vacancies.len(), 1);
        let record = &outcome.vacancies[0];
        assert_eq!(record.vacancy_id.as_deref(), Some("all-0"));
        assert_eq!(record.title, "");
        assert_eq!(record.experience, "");
        assert_eq!(record.key_skills, "");
        assert_eq!(record.description, "");
        assert_eq!(record.condition, "");
        assert!(outcome.ngrams.is_empty());
    }
}
