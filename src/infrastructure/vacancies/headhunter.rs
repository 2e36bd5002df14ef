#[cfg(test)]
#[path = "headhunter_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::SalaryRange;
use crate::domain::models::VacancyQuery;
use crate::domain::models::VacancySearch;
use crate::domain::models::VacancySummary;
use crate::domain::models::RESULT_LIMIT;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Employer {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Salary {
    #[serde(default)]
    from: Option<u64>,
    #[serde(default)]
    to: Option<u64>,
    #[serde(default)]
    currency: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Vacancy {
    name: String,
    #[serde(default)]
    employer: Option<Employer>,
    #[serde(default)]
    salary: Option<Salary>,
    alternate_url: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct VacancyListResponse {
    #[serde(default)]
    items: Vec<Vacancy>,
}

impl Salary {
    /// A range is only shown when both bounds and the currency are known.
    fn to_range(&self) -> Option<SalaryRange> {
        return Some(SalaryRange {
            from: self.from?,
            to: self.to?,
            currency: self.currency.clone()?,
        });
    }
}

impl Vacancy {
    fn to_summary(&self, rank: usize) -> VacancySummary {
        return VacancySummary {
            rank,
            name: self.name.to_string(),
            employer_name: self
                .employer
                .as_ref()
                .and_then(|employer| return employer.name.clone()),
            salary_range: self.salary.as_ref().and_then(|salary| return salary.to_range()),
            url: self.alternate_url.to_string(),
        };
    }
}

/// Client for the public hh.ru vacancy search.
pub struct HeadHunter {
    url: String,
    user_agent: String,
}

impl Default for HeadHunter {
    fn default() -> HeadHunter {
        return HeadHunter {
            url: Config::get(ConfigKey::VacanciesURL),
            user_agent: Config::get(ConfigKey::UserAgent),
        };
    }
}

#[async_trait]
impl VacancySearch for HeadHunter {
    #[allow(clippy::implicit_return)]
    async fn search(&self, query: &VacancyQuery) -> Result<Vec<VacancySummary>> {
        let res = reqwest::Client::new()
            .get(format!("{url}/vacancies", url = self.url))
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&query.params())
            .send()
            .await?;

        if res.status() != 200 {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to fetch vacancies from hh.ru"
            );
            return Ok(vec![]);
        }

        let body = res.json::<VacancyListResponse>().await?;
        tracing::debug!(items = body.items.len(), "Vacancy search response");

        let summaries: Vec<VacancySummary> = body
            .items
            .iter()
            .take(RESULT_LIMIT)
            .enumerate()
            .map(|(idx, vacancy)| {
                return vacancy.to_summary(idx + 1);
            })
            .collect();

        return Ok(summaries);
    }
}
