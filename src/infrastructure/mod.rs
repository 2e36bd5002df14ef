pub mod messengers;
pub mod vacancies;
