//! Built-in screening catalog seeded into fresh deployments.

use super::domain::{
    AnswerScoring, AssessmentQuestion, AssessmentType, AssessmentTypeId, ChoiceOption, QuestionId,
};

const PHQ9_PROMPTS: [&str; 9] = [
    "Little interest or pleasure in doing things",
    "Feeling down, depressed, or hopeless",
    "Trouble falling or staying asleep, or sleeping too much",
    "Feeling tired or having little energy",
    "Poor appetite or overeating",
    "Feeling bad about yourself, or that you are a failure or have let yourself or your family down",
    "Trouble concentrating on things, such as reading or watching television",
    "Moving or speaking so slowly that other people could have noticed, or being fidgety or restless",
    "Thoughts that you would be better off dead or of hurting yourself in some way",
];

const GAD7_PROMPTS: [&str; 7] = [
    "Feeling nervous, anxious, or on edge",
    "Not being able to stop or control worrying",
    "Worrying too much about different things",
    "Trouble relaxing",
    "Being so restless that it is hard to sit still",
    "Becoming easily annoyed or irritable",
    "Feeling afraid, as if something awful might happen",
];

fn frequency_scale() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption {
            value: "not_at_all".to_string(),
            label: "Not at all".to_string(),
            score: Some(0.0),
        },
        ChoiceOption {
            value: "several_days".to_string(),
            label: "Several days".to_string(),
            score: Some(1.0),
        },
        ChoiceOption {
            value: "more_than_half".to_string(),
            label: "More than half the days".to_string(),
            score: Some(2.0),
        },
        ChoiceOption {
            value: "nearly_every_day".to_string(),
            label: "Nearly every day".to_string(),
            score: Some(3.0),
        },
    ]
}

fn questions(
    type_id: &AssessmentTypeId,
    id_prefix: &str,
    prompts: &[&str],
) -> Vec<AssessmentQuestion> {
    prompts
        .iter()
        .enumerate()
        .map(|(index, prompt)| AssessmentQuestion {
            question_id: QuestionId(format!("{id_prefix}-q{}", index + 1)),
            type_id: type_id.clone(),
            prompt: prompt.to_string(),
            weight: 1.0,
            scoring: AnswerScoring::OptionTable(frequency_scale()),
        })
        .collect()
}

/// The two standard screeners every deployment starts with.
pub fn standard_catalog() -> Vec<(AssessmentType, Vec<AssessmentQuestion>)> {
    let phq9 = AssessmentType::new(
        "phq-9",
        "Depression Screening (PHQ-9)",
        "Nine-question screen for depressive symptoms over the last two weeks.",
    );
    let gad7 = AssessmentType::new(
        "gad-7",
        "Anxiety Screening (GAD-7)",
        "Seven-question screen for generalized anxiety over the last two weeks.",
    );

    let phq9_questions = questions(&phq9.type_id, "phq9", &PHQ9_PROMPTS);
    let gad7_questions = questions(&gad7.type_id, "gad7", &GAD7_PROMPTS);

    vec![(phq9, phq9_questions), (gad7, gad7_questions)]
}
