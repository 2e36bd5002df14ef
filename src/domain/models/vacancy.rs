#[cfg(test)]
#[path = "vacancy_test.rs"]
mod tests;

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;

use super::ExperienceBand;

/// Number of vacancies requested from, and shown for, a single search.
pub const RESULT_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VacancyQuery {
    pub title: String,
    pub salary: u64,
    pub experience: ExperienceBand,
    pub per_page: usize,
}

impl VacancyQuery {
    pub fn new(title: &str, salary: u64, experience: ExperienceBand) -> VacancyQuery {
        return VacancyQuery {
            title: title.to_string(),
            salary,
            experience,
            per_page: RESULT_LIMIT,
        };
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        return vec![
            ("text", self.title.to_string()),
            ("salary", self.salary.to_string()),
            ("experience", self.experience.api_id().to_string()),
            ("per_page", self.per_page.to_string()),
        ];
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SalaryRange {
    pub from: u64,
    pub to: u64,
    pub currency: String,
}

impl fmt::Display for SalaryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{} - {} {}", self.from, self.to, self.currency);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VacancySummary {
    pub rank: usize,
    pub name: String,
    pub employer_name: Option<String>,
    pub salary_range: Option<SalaryRange>,
    pub url: String,
}

/// Wraps text in legacy Markdown bold. Only `*` can end the entity early and
/// it can't be escaped inside one, so the entity is closed around each `*`,
/// which is emitted escaped.
fn bold(text: &str) -> String {
    return text
        .split('*')
        .map(|part| {
            if part.is_empty() {
                return String::new();
            }
            return format!("*{part}*");
        })
        .collect::<Vec<String>>()
        .join("\\*");
}

impl VacancySummary {
    pub fn render(&self) -> String {
        let employer = self
            .employer_name
            .clone()
            .unwrap_or_else(|| return "Не указан".to_string());

        let salary = match &self.salary_range {
            Some(range) => range.to_string(),
            None => "Не указана".to_string(),
        };

        return format!(
            "{rank}. {name} в {employer}\n   Зарплата: {salary}\n   [Ссылка на вакансию]({url})",
            rank = self.rank,
            name = bold(&self.name),
            employer = bold(&employer),
            url = self.url,
        );
    }
}

#[async_trait]
pub trait VacancySearch {
    /// Runs a single search and returns at most [`RESULT_LIMIT`] summaries in
    /// the order the upstream API ranked them.
    ///
    /// An upstream refusal (any non-200 status) is not an error: it is logged
    /// and yields an empty list. Errors are reserved for the request never
    /// completing or the payload failing to decode.
    async fn search(&self, query: &VacancyQuery) -> Result<Vec<VacancySummary>>;
}

pub type VacancySearchBox = Box<dyn VacancySearch + Send + Sync>;
