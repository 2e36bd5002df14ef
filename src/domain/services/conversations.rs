#[cfg(test)]
#[path = "conversations_test.rs"]
mod tests;

use anyhow::Result;

use super::dialogue::advance;
use super::dialogue::render_vacancies;
use super::dialogue::Effect;
use crate::domain::models::ChatId;
use crate::domain::models::Reply;
use crate::domain::models::SessionStoreBox;
use crate::domain::models::VacancySearchBox;

/// Runs the job selection dialogue against stored sessions. Callers must not
/// hand it two messages of the same chat concurrently.
pub struct Conversations {
    sessions: SessionStoreBox,
    vacancies: VacancySearchBox,
}

impl Conversations {
    pub fn new(sessions: SessionStoreBox, vacancies: VacancySearchBox) -> Conversations {
        return Conversations {
            sessions,
            vacancies,
        };
    }

    pub async fn handle(&self, chat_id: ChatId, text: &str) -> Result<Option<Reply>> {
        let session = self.sessions.get(chat_id).await?.unwrap_or_default();
        let transition = advance(session, text);

        if transition.next.is_idle() {
            self.sessions.delete(chat_id).await?;
        } else {
            self.sessions.put(chat_id, transition.next).await?;
        }

        match transition.effect {
            Effect::Silent => return Ok(None),
            Effect::Reply(reply) => return Ok(Some(reply)),
            Effect::Search(query) => {
                let vacancies = match self.vacancies.search(&query).await {
                    Ok(vacancies) => vacancies,
                    Err(err) => {
                        tracing::error!(error = ?err, chat_id = chat_id.0, "Vacancy search failed");
                        vec![]
                    }
                };

                tracing::info!(
                    chat_id = chat_id.0,
                    experience = query.experience.api_id(),
                    found = vacancies.len(),
                    "Vacancy search completed"
                );

                return Ok(Some(render_vacancies(&vacancies)));
            }
        }
    }
}
