// src/models/attempt.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::Validate;

/// Represents an entry of the `attempts` collection.
/// Created once per quiz submission and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub id: String,

    /// Owner of the attempt. Not checked against the `users` collection.
    pub user_id: String,

    /// Answers exactly as submitted.
    pub answers: Vec<AnswerRecord>,

    pub result: CareerResult,

    pub completed_at: DateTime<Utc>,
}

/// One submitted answer, kept exactly as the client sent it.
///
/// Clients send `{ "qId": .., "answer": .. }`, but nothing is checked: odd
/// types, unknown questions and extra fields are stored untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerRecord(pub Value);

impl AnswerRecord {
    pub fn new(q_id: i64, answer: &str) -> Self {
        Self(json!({ "qId": q_id, "answer": answer }))
    }

    /// The chosen option, if it is a string.
    pub fn answer(&self) -> Option<&str> {
        self.0.get("answer").and_then(Value::as_str)
    }
}

/// Recommendation embedded in an attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerResult {
    pub career_path: String,

    /// 0-100.
    pub confidence_score: u8,

    pub explanation: String,
    pub strengths: Vec<String>,
    pub roadmap: Vec<String>,
}

/// DTO for submitting a quiz.
/// `answers` stays optional so that a missing array is reported as a 400
/// with a readable message instead of a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    #[serde(default)]
    #[validate(required(message = "Answers array is required"))]
    pub answers: Option<Vec<AnswerRecord>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizResponse {
    pub success: bool,
    pub result: CareerResult,
    pub attempt_id: String,
}
