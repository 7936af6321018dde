use serde_json::Value;
use tracing::error;

use crate::error::BotError;

/// One homework entry from the API, normalized to string-or-absent fields.
/// A field that is present but not a string counts as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeworkRecord {
    pub name: Option<String>,
    pub status: Option<String>,
}

/// A validated polling response: the service cursor plus the homework records
/// that changed inside the requested window, in arrival order.
#[derive(Debug, Clone)]
pub struct PollResult {
    pub current_date: i64,
    pub homeworks: Vec<HomeworkRecord>,
}

/// Validate a raw API payload into a [`PollResult`].
///
/// The service occasionally omits fields during backend hiccups; this turns
/// "missing or wrong-shaped JSON" into one precise
/// [`BotError::MalformedResponse`] instead of letting a shape mismatch
/// surface deeper in the pipeline. Absent keys are logged before the type
/// checks run.
pub fn validate(payload: &Value) -> Result<PollResult, BotError> {
    let current_date = payload.get("current_date");
    if current_date.is_none() {
        error!("\"current_date\" key is missing from the API response");
    }
    let homeworks = payload.get("homeworks");
    if homeworks.is_none() {
        error!("\"homeworks\" key is missing from the API response");
    }

    let current_date = current_date.and_then(Value::as_i64).ok_or_else(|| {
        BotError::MalformedResponse("\"current_date\" is missing or not an integer".into())
    })?;
    let entries = homeworks.and_then(Value::as_array).ok_or_else(|| {
        BotError::MalformedResponse("\"homeworks\" is missing or not a list".into())
    })?;

    let homeworks = entries.iter().map(record_from_entry).collect();

    Ok(PollResult {
        current_date,
        homeworks,
    })
}

/// Normalize one homework entry. A non-object entry yields a record with both
/// fields absent; the resolver rejects it later with a per-record error.
fn record_from_entry(entry: &Value) -> HomeworkRecord {
    HomeworkRecord {
        name: string_field(entry, "homework_name"),
        status: string_field(entry, "status"),
    }
}

fn string_field(entry: &Value, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_payload_keeps_arrival_order() {
        let payload = json!({
            "current_date": 1_700_000_000_i64,
            "homeworks": [
                {"homework_name": "hw1", "status": "approved"},
                {"homework_name": "hw2", "status": "reviewing"},
            ],
        });

        let result = validate(&payload).unwrap();
        assert_eq!(result.current_date, 1_700_000_000);
        assert_eq!(result.homeworks.len(), 2);
        assert_eq!(result.homeworks[0].name.as_deref(), Some("hw1"));
        assert_eq!(result.homeworks[0].status.as_deref(), Some("approved"));
        assert_eq!(result.homeworks[1].name.as_deref(), Some("hw2"));
        assert_eq!(result.homeworks[1].status.as_deref(), Some("reviewing"));
    }

    #[test]
    fn test_empty_homework_list_is_valid() {
        let payload = json!({"current_date": 1000, "homeworks": []});

        let result = validate(&payload).unwrap();
        assert_eq!(result.current_date, 1000);
        assert!(result.homeworks.is_empty());
    }

    #[test]
    fn test_missing_homeworks_key_is_malformed() {
        let payload = json!({"current_date": 1000});

        let err = validate(&payload).unwrap_err();
        assert!(matches!(err, BotError::MalformedResponse(_)));
    }

    #[test]
    fn test_missing_current_date_is_malformed() {
        let payload = json!({"homeworks": []});

        let err = validate(&payload).unwrap_err();
        assert!(matches!(err, BotError::MalformedResponse(_)));
    }

    #[test]
    fn test_non_integer_cursor_is_malformed() {
        for bad in [json!("1000"), json!(true), json!(1000.5), json!(null)] {
            let payload = json!({"current_date": bad, "homeworks": []});
            let err = validate(&payload).unwrap_err();
            assert!(matches!(err, BotError::MalformedResponse(_)), "{}", bad);
        }
    }

    #[test]
    fn test_non_list_homeworks_is_malformed() {
        let payload = json!({
            "current_date": 1000,
            "homeworks": {"homework_name": "hw1", "status": "approved"},
        });

        let err = validate(&payload).unwrap_err();
        assert!(matches!(err, BotError::MalformedResponse(_)));
    }

    #[test]
    fn test_wrong_typed_record_fields_become_absent() {
        let payload = json!({
            "current_date": 1000,
            "homeworks": [
                {"homework_name": 5, "status": "approved"},
                {"homework_name": "hw2"},
                "not an object",
            ],
        });

        let result = validate(&payload).unwrap();
        assert_eq!(
            result.homeworks[0],
            HomeworkRecord {
                name: None,
                status: Some("approved".to_string()),
            }
        );
        assert_eq!(
            result.homeworks[1],
            HomeworkRecord {
                name: Some("hw2".to_string()),
                status: None,
            }
        );
        assert_eq!(result.homeworks[2], HomeworkRecord::default());
    }
}
