use serde_json::Value;
use std::collections::BTreeMap;
use crate::models::domain::{Answer, AnswerMap};

/// Parse stored quiz answers in the `{questionId: "A"|"B"|"C"}` format
///
/// Individual values that are not a recognizable answer are skipped with a warning,
/// so a partially corrupted record still yields a profile. Only input that is not a
/// JSON object at all is rejected.
pub fn parse_answers_json(json: &str) -> Result<AnswerMap, serde_json::Error> {
    let raw: BTreeMap<String, Value> = serde_json::from_str(json)?;
    Ok(answers_from_raw(raw))
}

/// Build an answer map from loosely typed values
pub fn answers_from_raw<I, V>(raw: I) -> AnswerMap
where
    I: IntoIterator<Item = (String, V)>,
    V: Into<Value>,
{
    let mut answers = AnswerMap::new();
    for (question_id, value) in raw {
        let value = value.into();
        match value.as_str().and_then(Answer::parse) {
            Some(answer) => {
                answers.insert(question_id, answer);
            }
            None => {
                tracing::warn!("Skipping unrecognized answer for question {}: {}", question_id, value);
            }
        }
    }
    answers
}
