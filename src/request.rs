use async_trait::async_trait;
use reqwest::Client;

use crate::config::ParserConfig;
use crate::log::Logger;
use crate::models::{SearchPage, SearchQuery, VacancyResponse};
use crate::{Error, Result};

/// The two endpoints of the vacancy API the parser talks to.
#[async_trait]
pub trait VacancyApi: Send + Sync {
    /// Requests one page of search results.
    async fn search_page(&self, query: &SearchQuery) -> Result<SearchPage>;

    /// Requests the full record of a single vacancy.
    async fn vacancy(&self, id: &str) -> Result<VacancyResponse>;
}

/// `VacancyApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HhClient {
    client: Client,
    base_url: String,
    log: Logger,
}

impl HhClient {
    pub fn new(config: &ParserConfig, log: Logger) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            log,
        })
    }
}

#[async_trait]
impl VacancyApi for HhClient {
    async fn search_page(&self, query: &SearchQuery) -> Result<SearchPage> {
        let res = self
            .client
            .get(format!("{}/vacancies", self.base_url))
            .query(query)
            .send()
            .await?;
        self.log
            .in_scope(|| tracing::debug!(url = %res.url(), "requested search page"));

        let body = res.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    // The status code is not checked: rejections come back as JSON with an `errors` field.
    async fn vacancy(&self, id: &str) -> Result<VacancyResponse> {
        let res = self
            .client
            .get(format!("{}/vacancies/{id}", self.base_url))
            .send()
            .await?;
        let body = res.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Fetches a vacancy's full record. A failed request is logged and treated as no data.
pub async fn get_vacancy_info<A: VacancyApi + ?Sized>(
    api: &A,
    id: &str,
    log: &Logger,
) -> Option<VacancyResponse> {
    match api.vacancy(id).await {
        Ok(vacancy) => Some(vacancy),
        Err(err) => {
            log.in_scope(|| tracing::warn!(vacancy_id = id, kind = err.kind(), "ERROR {err}"));
            None
        }
    }
}
