// src/scoring.rs

//! Career recommendation.
//!
//! The quiz service only talks to [`Recommender`]. [`StubRecommender`] is a
//! fixed rule set; an inference-backed implementation can replace it without
//! touching the service, as long as it keeps the answers-in, result-out shape.

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::attempt::{AnswerRecord, CareerResult};

#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("recommendation backend failed: {0}")]
    Backend(String),
}

#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(&self, answers: &[AnswerRecord]) -> Result<CareerResult, RecommendError>;
}

pub type SharedRecommender = Arc<dyn Recommender>;

/// Placeholder scorer: weights each chosen option and maps the total onto
/// three hard-coded career paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubRecommender;

#[async_trait]
impl Recommender for StubRecommender {
    async fn recommend(&self, answers: &[AnswerRecord]) -> Result<CareerResult, RecommendError> {
        let score = total_score(answers);
        let best = pick_best(&CAREER_PATHS, score)
            .ok_or_else(|| RecommendError::Backend("no career paths configured".to_string()))?;
        tracing::debug!(score, career_path = best.career_path, "stub recommendation computed");
        Ok(best.to_result(score))
    }
}

/// Weight of a single chosen option. Unknown, missing or non-string options
/// count as 1.
pub fn option_weight(answer: Option<&str>) -> u32 {
    match answer {
        Some("A") => 3,
        Some("B") | Some("D") => 2,
        Some("C") => 1,
        _ => 1,
    }
}

pub fn total_score(answers: &[AnswerRecord]) -> u32 {
    answers
        .iter()
        .map(|a| option_weight(a.answer()))
        .sum()
}

/// A career path whose confidence is `clamp(slope * score, floor, ceiling)`.
#[derive(Debug)]
pub struct CareerTemplate {
    pub career_path: &'static str,
    pub slope: f64,
    pub floor: f64,
    pub ceiling: f64,
    pub explanation: &'static str,
    pub strengths: &'static [&'static str],
    pub roadmap: &'static [&'static str],
}

impl CareerTemplate {
    /// Rounded to the nearest integer after clamping.
    pub fn confidence(&self, score: u32) -> u8 {
        (self.slope * f64::from(score))
            .max(self.floor)
            .min(self.ceiling)
            .round() as u8
    }

    pub fn to_result(&self, score: u32) -> CareerResult {
        CareerResult {
            career_path: self.career_path.to_string(),
            confidence_score: self.confidence(score),
            explanation: self.explanation.to_string(),
            strengths: self.strengths.iter().map(|s| s.to_string()).collect(),
            roadmap: self.roadmap.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Highest confidence wins; on a tie the earlier template is kept.
pub fn pick_best(templates: &[CareerTemplate], score: u32) -> Option<&CareerTemplate> {
    templates.iter().fold(None, |best: Option<&CareerTemplate>, current| match best {
        Some(b) if current.confidence(score) <= b.confidence(score) => Some(b),
        _ => Some(current),
    })
}

pub const CAREER_PATHS: [CareerTemplate; 3] = [
    CareerTemplate {
        career_path: "Software Development",
        slope: 2.0,
        floor: 60.0,
        ceiling: 95.0,
        explanation: "Based on your analytical thinking, problem-solving skills, and preference for logical challenges, software development appears to be an excellent career match.",
        strengths: &[
            "Strong analytical and logical thinking skills",
            "Excellent problem-solving abilities",
            "Preference for structured and organized work",
            "Interest in technology and innovation",
        ],
        roadmap: &[
            "Learn programming fundamentals (JavaScript, Python)",
            "Build portfolio projects",
            "Consider computer science degree or bootcamp",
            "Network with developers and join communities",
        ],
    },
    CareerTemplate {
        career_path: "Data Science",
        slope: 1.8,
        floor: 55.0,
        ceiling: 90.0,
        explanation: "Your responses indicate strong aptitude for data analysis, statistical thinking, and pattern recognition.",
        strengths: &[
            "Strong analytical and statistical skills",
            "Attention to detail and accuracy",
            "Interest in discovering insights from data",
            "Logical reasoning abilities",
        ],
        roadmap: &[
            "Learn statistics and probability",
            "Master data analysis tools (Python, R, SQL)",
            "Study machine learning concepts",
            "Work on real-world datasets",
        ],
    },
    CareerTemplate {
        career_path: "Product Management",
        slope: 1.5,
        floor: 50.0,
        ceiling: 85.0,
        explanation: "Your combination of analytical thinking and communication skills suggests strong potential in product management.",
        strengths: &[
            "Good communication and interpersonal skills",
            "Strategic thinking and planning abilities",
            "Understanding of user needs and market trends",
            "Leadership and coordination skills",
        ],
        roadmap: &[
            "Learn product management frameworks",
            "Develop business acumen",
            "Practice user research and analysis",
            "Build cross-functional collaboration skills",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(choices: &[&str]) -> Vec<AnswerRecord> {
        choices
            .iter()
            .enumerate()
            .map(|(i, c)| AnswerRecord::new(i as i64 + 1, c))
            .collect()
    }

    #[test]
    fn option_weights() {
        assert_eq!(option_weight(Some("A")), 3);
        assert_eq!(option_weight(Some("B")), 2);
        assert_eq!(option_weight(Some("C")), 1);
        assert_eq!(option_weight(Some("D")), 2);
        assert_eq!(option_weight(Some("Z")), 1);
        assert_eq!(option_weight(Some("a")), 1);
        assert_eq!(option_weight(None), 1);
    }

    #[test]
    fn malformed_answers_still_score() {
        let mut list = answers(&["A", "B"]);
        list.push(AnswerRecord(serde_json::json!({})));
        list.push(AnswerRecord(serde_json::json!({ "qId": "q1", "answer": 5 })));
        list.push(AnswerRecord(serde_json::json!("not an object")));
        assert_eq!(total_score(&list), 8);
        assert_eq!(total_score(&[]), 0);
    }

    #[test]
    fn confidence_is_clamped_linear() {
        let [software, data, product] = &CAREER_PATHS;

        assert_eq!(software.confidence(6), 60);
        assert_eq!(data.confidence(6), 55);
        assert_eq!(product.confidence(6), 50);

        assert_eq!(software.confidence(40), 80);
        assert_eq!(data.confidence(40), 72);
        assert_eq!(product.confidence(40), 60);

        assert_eq!(software.confidence(100), 95);
        assert_eq!(data.confidence(100), 90);
        assert_eq!(product.confidence(100), 85);
    }

    #[test]
    fn fractional_confidence_is_rounded() {
        // 1.8 * 31 = 55.8
        assert_eq!(CAREER_PATHS[1].confidence(31), 56);
    }

    #[tokio::test]
    async fn two_a_answers_recommend_software_development() {
        let result = StubRecommender
            .recommend(&answers(&["A", "A"]))
            .await
            .unwrap();

        assert_eq!(result.career_path, "Software Development");
        assert_eq!(result.confidence_score, 60);
        assert_eq!(result.strengths.len(), 4);
        assert_eq!(result.roadmap.len(), 4);
    }

    #[tokio::test]
    async fn recommendation_is_deterministic() {
        let input = answers(&["B", "C", "D", "A", "Q"]);
        let first = StubRecommender.recommend(&input).await.unwrap();
        let second = StubRecommender.recommend(&input).await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn ties_keep_declaration_order() {
        const TIED: [CareerTemplate; 2] = [
            CareerTemplate {
                career_path: "First",
                slope: 1.0,
                floor: 70.0,
                ceiling: 70.0,
                explanation: "",
                strengths: &[],
                roadmap: &[],
            },
            CareerTemplate {
                career_path: "Second",
                slope: 1.0,
                floor: 70.0,
                ceiling: 70.0,
                explanation: "",
                strengths: &[],
                roadmap: &[],
            },
        ];

        assert_eq!(pick_best(&TIED, 10).unwrap().career_path, "First");
        assert!(pick_best(&[], 10).is_none());
    }

    #[test]
    fn strictly_greater_later_template_wins() {
        const RISING: [CareerTemplate; 2] = [
            CareerTemplate {
                career_path: "Low",
                slope: 0.0,
                floor: 10.0,
                ceiling: 10.0,
                explanation: "",
                strengths: &[],
                roadmap: &[],
            },
            CareerTemplate {
                career_path: "High",
                slope: 0.0,
                floor: 11.0,
                ceiling: 11.0,
                explanation: "",
                strengths: &[],
                roadmap: &[],
            },
        ];

        assert_eq!(pick_best(&RISING, 0).unwrap().career_path, "High");
    }
}
