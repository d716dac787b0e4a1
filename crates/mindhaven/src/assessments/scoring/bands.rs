use super::super::domain::AssessmentCategory;

/// Interpretation and advice selected for one final score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banding {
    pub interpretation: String,
    pub recommendations: String,
}

struct Band {
    /// Exclusive upper bound on the final score.
    upper: f64,
    label: &'static str,
    advice: &'static str,
}

/// Shared severity cutoffs: <5 minimal, <10 mild, <15 moderate, else severe.
const DEPRESSION_BANDS: [Band; 3] = [
    Band {
        upper: 5.0,
        label: "Minimal depression",
        advice: "Continue with self-care and monitoring",
    },
    Band {
        upper: 10.0,
        label: "Mild depression",
        advice: "Consider lifestyle changes and self-help resources",
    },
    Band {
        upper: 15.0,
        label: "Moderate depression",
        advice: "Consider consulting with a mental health professional",
    },
];

const DEPRESSION_SEVERE: (&str, &str) = (
    "Severe depression",
    "Please consult with a mental health professional soon",
);

const ANXIETY_BANDS: [Band; 3] = [
    Band {
        upper: 5.0,
        label: "Minimal anxiety",
        advice: "Continue with self-care and monitoring",
    },
    Band {
        upper: 10.0,
        label: "Mild anxiety",
        advice: "Consider relaxation techniques and stress management",
    },
    Band {
        upper: 15.0,
        label: "Moderate anxiety",
        advice: "Consider consulting with a mental health professional",
    },
];

const ANXIETY_SEVERE: (&str, &str) = (
    "Severe anxiety",
    "Please consult with a mental health professional soon",
);

/// Map a rounded final score onto the category's interpretation band.
pub(crate) fn interpret(category: AssessmentCategory, final_score: f64) -> Banding {
    match category {
        AssessmentCategory::Depression => banded(&DEPRESSION_BANDS, DEPRESSION_SEVERE, final_score),
        AssessmentCategory::Anxiety => banded(&ANXIETY_BANDS, ANXIETY_SEVERE, final_score),
        AssessmentCategory::General => Banding {
            interpretation: format!("Score: {final_score:.2}"),
            recommendations: "Consider reviewing your results with a healthcare provider"
                .to_string(),
        },
    }
}

fn banded(bands: &[Band], severe: (&'static str, &'static str), final_score: f64) -> Banding {
    for band in bands {
        if final_score < band.upper {
            return Banding {
                interpretation: band.label.to_string(),
                recommendations: band.advice.to_string(),
            };
        }
    }
    Banding {
        interpretation: severe.0.to_string(),
        recommendations: severe.1.to_string(),
    }
}
