use super::super::domain::{AnswerSet, AssessmentQuestion};

/// Weighted accumulation over one submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub total_score: f64,
    pub total_weight: f64,
    /// `total_score / total_weight` rounded to two decimals, or 0 when no
    /// question contributed any weight.
    pub final_score: f64,
}

pub(crate) fn score_answers(questions: &[AssessmentQuestion], answers: &AnswerSet) -> ScoreBreakdown {
    let mut total_score = 0.0;
    let mut total_weight = 0.0;

    for question in questions {
        // Unanswered questions contribute neither score nor weight.
        let Some(answer) = answers.get(&question.question_id) else {
            continue;
        };
        if answer.is_empty() {
            continue;
        }

        let option_score = question
            .scoring
            .option_score(answer)
            .unwrap_or_else(|| parse_numeric(answer));

        total_score += option_score * question.weight;
        total_weight += question.weight;
    }

    let final_score = if total_weight > 0.0 {
        round2(total_score / total_weight)
    } else {
        0.0
    };

    ScoreBreakdown {
        total_score,
        total_weight,
        final_score,
    }
}

/// Answers that fail to parse contribute 0 rather than poisoning the
/// aggregate.
fn parse_numeric(answer: &str) -> f64 {
    answer.trim().parse::<f64>().unwrap_or(0.0)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
