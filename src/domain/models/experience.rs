#[cfg(test)]
#[path = "experience_test.rs"]
mod tests;

use strum::EnumIter;
use strum::IntoEnumIterator;

/// Work experience range accepted by the hh.ru search API. The user picks one
/// by its label, the API receives its identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum ExperienceBand {
    NoExperience,
    Between1And3,
    Between3And6,
    MoreThan6,
}

impl ExperienceBand {
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceBand::NoExperience => return "Нет опыта",
            ExperienceBand::Between1And3 => return "От 1 года до 3 лет",
            ExperienceBand::Between3And6 => return "От 3 до 5 лет",
            ExperienceBand::MoreThan6 => return "Более 5 лет",
        }
    }

    pub fn api_id(&self) -> &'static str {
        match self {
            ExperienceBand::NoExperience => return "noExperience",
            ExperienceBand::Between1And3 => return "between1And3",
            ExperienceBand::Between3And6 => return "between3And6",
            ExperienceBand::MoreThan6 => return "moreThan6",
        }
    }

    pub fn from_label(label: &str) -> Option<ExperienceBand> {
        return ExperienceBand::iter().find(|band| return band.label() == label);
    }

    pub fn from_api_id(id: &str) -> Option<ExperienceBand> {
        return ExperienceBand::iter().find(|band| return band.api_id() == id);
    }

    pub fn labels() -> Vec<&'static str> {
        return ExperienceBand::iter()
            .map(|band| return band.label())
            .collect();
    }

    pub fn api_ids() -> Vec<&'static str> {
        return ExperienceBand::iter()
            .map(|band| return band.api_id())
            .collect();
    }
}
