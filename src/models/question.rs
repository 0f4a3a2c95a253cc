// src/models/question.rs

use serde::{Deserialize, Serialize};

/// Represents an entry of the `questions` collection.
/// Seeded once at startup and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// The prompt shown to the user.
    pub text: String,

    /// Choices in display order.
    pub options: Vec<QuestionOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Option key, e.g. "A".
    pub id: String,
    pub text: String,
}
