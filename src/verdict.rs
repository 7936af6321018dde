use crate::error::BotError;
use crate::response::HomeworkRecord;

/// Message template for a review verdict, or `None` for an unrecognized one.
/// The texts are the exact strings the review service shows its students.
pub fn verdict_template(status: &str) -> Option<&'static str> {
    match status {
        "approved" => Some("Работа проверена: ревьюеру всё понравилось. Ура!"),
        "reviewing" => Some("Работа взята на проверку ревьюером."),
        "rejected" => Some("Работа проверена: у ревьюера есть замечания."),
        _ => None,
    }
}

/// Render the notification text for one homework record.
///
/// The check order is part of the contract: a missing status is reported
/// before a missing name, and only a present status is matched against the
/// verdict catalog.
pub fn status_change_message(record: &HomeworkRecord) -> Result<String, BotError> {
    let status = record.status.as_deref().ok_or(BotError::MissingStatus)?;
    let name = record.name.as_deref().ok_or(BotError::MissingName)?;

    match verdict_template(status) {
        Some(template) => Ok(format!(
            "Changed review status for \"{}\". {}",
            name, template
        )),
        None => Err(BotError::UnknownVerdict(status.to_string())),
    }
}
