#[cfg(test)]
#[path = "dialogue_test.rs"]
mod tests;

use crate::domain::models::BotCommand;
use crate::domain::models::ExperienceBand;
use crate::domain::models::Keyboard;
use crate::domain::models::Reply;
use crate::domain::models::Session;
use crate::domain::models::VacancyQuery;
use crate::domain::models::VacancySummary;

pub const WELCOME_TEXT: &str = "Привет! Я бот по подбору вакансий на hh.ru.\nЯ могу помочь вам найти работу по заданным критериям.\nИспользуйте команду /job_selection, чтобы начать подбор вакансий.";
pub const TITLE_PROMPT: &str = "Пожалуйста, отправь мне название вакансии, которую ты ищешь.";
pub const SALARY_PROMPT: &str =
    "Теперь укажи желаемый уровень заработной платы одним числом (например, 100000).";
pub const SALARY_INVALID: &str = "Пожалуйста, введи положительное число для заработной платы.";
pub const EXPERIENCE_PROMPT: &str = "Выбери диапазон опыта работы:";
pub const EXPERIENCE_INVALID: &str =
    "Пожалуйста, выбери один из предложенных вариантов для опыта работы:";
pub const RESULTS_HEADER: &str = "Вот несколько найденных вакансий:";
pub const NOT_FOUND_TEXT: &str = "К сожалению, вакансий по заданным критериям не найдено.";

/// What the caller has to do after a turn was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Reply(Reply),
    /// All answers are in. The caller runs the search and replies with
    /// [`render_vacancies`].
    Search(VacancyQuery),
    Silent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: Session,
    pub effect: Effect,
}

impl Transition {
    fn reply(next: Session, reply: Reply) -> Transition {
        return Transition {
            next,
            effect: Effect::Reply(reply),
        };
    }

    fn silent(next: Session) -> Transition {
        return Transition {
            next,
            effect: Effect::Silent,
        };
    }
}

pub fn experience_keyboard() -> Keyboard {
    let rows = ExperienceBand::labels()
        .chunks(2)
        .map(|row| {
            return row
                .iter()
                .map(|label| return label.to_string())
                .collect::<Vec<String>>();
        })
        .collect::<Vec<Vec<String>>>();

    return Keyboard::Choices(rows);
}

/// Accepts ASCII digits only, so signs, separators and decimals are rejected
/// rather than coerced. Zero and values overflowing `u64` are rejected too.
pub fn parse_salary(text: &str) -> Option<u64> {
    if text.is_empty() || !text.chars().all(|c| return c.is_ascii_digit()) {
        return None;
    }

    let salary = text.parse::<u64>().ok()?;
    if salary == 0 {
        return None;
    }

    return Some(salary);
}

/// Applies a single inbound message to a chat's session. Has no side effects;
/// persisting `next` and acting on the effect is left to the caller.
pub fn advance(session: Session, input: &str) -> Transition {
    if let Some(cmd) = BotCommand::parse(input) {
        if cmd.is_start() {
            return Transition::reply(Session::Idle, Reply::new(WELCOME_TEXT));
        }

        if cmd.is_job_selection() {
            return Transition::reply(Session::AwaitingTitle, Reply::new(TITLE_PROMPT));
        }

        return Transition::silent(session);
    }

    let text = input.trim();

    match session {
        Session::Idle => return Transition::silent(Session::Idle),
        Session::AwaitingTitle => {
            if text.is_empty() {
                return Transition::reply(Session::AwaitingTitle, Reply::new(TITLE_PROMPT));
            }

            return Transition::reply(
                Session::AwaitingSalary {
                    title: text.to_string(),
                },
                Reply::new(SALARY_PROMPT),
            );
        }
        Session::AwaitingSalary { title } => match parse_salary(text) {
            Some(salary) => {
                return Transition::reply(
                    Session::AwaitingExperience { title, salary },
                    Reply::new(EXPERIENCE_PROMPT).with_keyboard(experience_keyboard()),
                );
            }
            None => {
                return Transition::reply(
                    Session::AwaitingSalary { title },
                    Reply::new(SALARY_INVALID),
                );
            }
        },
        Session::AwaitingExperience { title, salary } => match ExperienceBand::from_label(text) {
            Some(experience) => {
                return Transition {
                    next: Session::Idle,
                    effect: Effect::Search(VacancyQuery::new(&title, salary, experience)),
                };
            }
            None => {
                let text = format!(
                    "{EXPERIENCE_INVALID} {}.",
                    ExperienceBand::labels().join(", ")
                );
                return Transition::reply(
                    Session::AwaitingExperience { title, salary },
                    Reply::new(&text).with_keyboard(experience_keyboard()),
                );
            }
        },
    }
}

/// Final reply of a dialogue. Always clears the experience keyboard.
pub fn render_vacancies(vacancies: &[VacancySummary]) -> Reply {
    if vacancies.is_empty() {
        return Reply::new(NOT_FOUND_TEXT).with_keyboard(Keyboard::Remove);
    }

    let listing = vacancies
        .iter()
        .map(|vacancy| return vacancy.render())
        .collect::<Vec<String>>()
        .join("\n\n");

    return Reply::new(&format!("{RESULTS_HEADER}\n\n{listing}"))
        .with_markdown()
        .with_keyboard(Keyboard::Remove);
}
