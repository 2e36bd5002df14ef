use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use super::Conversations;
use crate::domain::models::ChatId;
use crate::domain::models::ExperienceBand;
use crate::domain::models::Keyboard;
use crate::domain::models::SalaryRange;
use crate::domain::models::VacancyQuery;
use crate::domain::models::VacancySearch;
use crate::domain::models::VacancySummary;
use crate::domain::services::dialogue::EXPERIENCE_PROMPT;
use crate::domain::services::dialogue::NOT_FOUND_TEXT;
use crate::domain::services::dialogue::SALARY_INVALID;
use crate::domain::services::dialogue::SALARY_PROMPT;
use crate::domain::services::dialogue::TITLE_PROMPT;
use crate::domain::services::dialogue::WELCOME_TEXT;
use crate::domain::services::Sessions;

#[derive(Clone)]
enum Outcome {
    Found(Vec<VacancySummary>),
    Broken,
}

struct MockSearch {
    outcome: Outcome,
    queries: Arc<Mutex<Vec<VacancyQuery>>>,
}

#[async_trait]
impl VacancySearch for MockSearch {
    async fn search(&self, query: &VacancyQuery) -> Result<Vec<VacancySummary>> {
        self.queries.lock().unwrap().push(query.clone());
        match &self.outcome {
            Outcome::Found(vacancies) => return Ok(vacancies.clone()),
            Outcome::Broken => bail!("connection reset"),
        }
    }
}

fn conversations(outcome: Outcome) -> (Conversations, Arc<Mutex<Vec<VacancyQuery>>>) {
    let queries = Arc::new(Mutex::new(vec![]));
    let search = MockSearch {
        outcome,
        queries: queries.clone(),
    };

    let conversations = Conversations::new(Box::<Sessions>::default(), Box::new(search));
    return (conversations, queries);
}

fn summary() -> VacancySummary {
    return VacancySummary {
        rank: 1,
        name: "Rust developer".to_string(),
        employer_name: Some("Yandex".to_string()),
        salary_range: Some(SalaryRange {
            from: 250000,
            to: 350000,
            currency: "RUR".to_string(),
        }),
        url: "https://hh.ru/vacancy/93012345".to_string(),
    };
}

async fn send(conversations: &Conversations, text: &str) -> Result<String> {
    let reply = conversations.handle(ChatId(42), text).await?;
    if reply.is_none() {
        bail!("Expected a reply to {text}");
    }

    return Ok(reply.unwrap().text);
}

#[tokio::test]
async fn it_walks_through_the_dialogue() -> Result<()> {
    let (conversations, queries) = conversations(Outcome::Found(vec![summary()]));

    assert_eq!(send(&conversations, "/job_selection").await?, TITLE_PROMPT);
    assert_eq!(send(&conversations, "Rust developer").await?, SALARY_PROMPT);
    assert_eq!(send(&conversations, "лучшую").await?, SALARY_INVALID);
    assert_eq!(send(&conversations, "150000").await?, EXPERIENCE_PROMPT);

    let reply = conversations
        .handle(ChatId(42), "От 1 года до 3 лет")
        .await?
        .unwrap();
    assert!(reply.text.starts_with("Вот несколько найденных вакансий:"));
    assert!(reply.text.contains("250000 - 350000 RUR"));
    assert!(reply.markdown);
    assert_eq!(reply.keyboard, Keyboard::Remove);

    assert_eq!(
        *queries.lock().unwrap(),
        vec![VacancyQuery::new(
            "Rust developer",
            150000,
            ExperienceBand::Between1And3
        )]
    );

    // The session ends with the search.
    assert!(conversations
        .handle(ChatId(42), "От 1 года до 3 лет")
        .await?
        .is_none());

    return Ok(());
}

#[tokio::test]
async fn it_renders_not_found_for_empty_results() -> Result<()> {
    let (conversations, _queries) = conversations(Outcome::Found(vec![]));

    send(&conversations, "/job_selection").await?;
    send(&conversations, "Водолаз").await?;
    send(&conversations, "90000").await?;

    assert_eq!(send(&conversations, "Более 5 лет").await?, NOT_FOUND_TEXT);

    return Ok(());
}

#[tokio::test]
async fn it_renders_not_found_for_failed_search() -> Result<()> {
    let (conversations, queries) = conversations(Outcome::Broken);

    send(&conversations, "/job_selection").await?;
    send(&conversations, "Водолаз").await?;
    send(&conversations, "90000").await?;

    assert_eq!(send(&conversations, "Нет опыта").await?, NOT_FOUND_TEXT);
    assert_eq!(queries.lock().unwrap().len(), 1);

    return Ok(());
}

#[tokio::test]
async fn it_resets_in_progress_dialogue() -> Result<()> {
    let (conversations, queries) = conversations(Outcome::Found(vec![]));

    send(&conversations, "/job_selection").await?;
    send(&conversations, "Rust developer").await?;
    assert_eq!(send(&conversations, "/start").await?, WELCOME_TEXT);
    assert_eq!(send(&conversations, "/start").await?, WELCOME_TEXT);

    // Back to idle, so further text is not taken as a salary.
    assert!(conversations.handle(ChatId(42), "150000").await?.is_none());
    assert!(queries.lock().unwrap().is_empty());

    return Ok(());
}

#[tokio::test]
async fn it_keeps_chats_apart() -> Result<()> {
    let (conversations, _queries) = conversations(Outcome::Found(vec![]));

    send(&conversations, "/job_selection").await?;
    assert!(conversations.handle(ChatId(7), "Rust developer").await?.is_none());
    assert_eq!(send(&conversations, "Rust developer").await?, SALARY_PROMPT);

    return Ok(());
}
