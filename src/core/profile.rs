use crate::models::{Answer, AnswerMap, Pace, Profile};

/// Points a single answer contributes to a dimension, before scaling by
/// `100 / question_count`
#[derive(Debug, Clone, Copy)]
pub struct AnswerWeights {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl AnswerWeights {
    #[inline]
    pub const fn for_answer(&self, answer: Answer) -> f64 {
        match answer {
            Answer::A => self.a,
            Answer::B => self.b,
            Answer::C => self.c,
        }
    }
}

/// A leans towards action, B towards method, C towards imagination
pub const ANALYSIS_WEIGHTS: AnswerWeights = AnswerWeights { a: 0.6, b: 1.0, c: 0.5 };
pub const EXECUTION_WEIGHTS: AnswerWeights = AnswerWeights { a: 1.0, b: 0.6, c: 0.2 };
pub const CREATIVITY_WEIGHTS: AnswerWeights = AnswerWeights { a: 0.3, b: 0.4, c: 1.0 };
pub const STRUCTURE_WEIGHTS: AnswerWeights = AnswerWeights { a: 0.4, b: 1.0, c: 0.2 };
pub const AUTONOMY_WEIGHTS: AnswerWeights = AnswerWeights { a: 0.8, b: 0.4, c: 0.7 };
pub const STRESS_TOLERANCE_WEIGHTS: AnswerWeights = AnswerWeights { a: 0.9, b: 0.6, c: 0.3 };

/// Compute a user profile from quiz answers
///
/// Every answer adds `weight * 100 / question_count` to each dimension, so a quiz
/// answered entirely with the strongest choice for a dimension scores 100 on it.
/// Pace is a majority vote (A fast, B moderate, C slow); ties go to moderate.
///
/// An empty answer map yields [`Profile::neutral`].
pub fn compute_profile(answers: &AnswerMap) -> Profile {
    if answers.is_empty() {
        return Profile::neutral();
    }

    let step = 100.0 / answers.len() as f64;

    let mut analysis = 0.0;
    let mut execution = 0.0;
    let mut creativity = 0.0;
    let mut structure = 0.0;
    let mut autonomy = 0.0;
    let mut stress_tolerance = 0.0;
    let (mut fast, mut moderate, mut slow) = (0usize, 0usize, 0usize);

    for answer in answers.values().copied() {
        analysis += ANALYSIS_WEIGHTS.for_answer(answer) * step;
        execution += EXECUTION_WEIGHTS.for_answer(answer) * step;
        creativity += CREATIVITY_WEIGHTS.for_answer(answer) * step;
        structure += STRUCTURE_WEIGHTS.for_answer(answer) * step;
        autonomy += AUTONOMY_WEIGHTS.for_answer(answer) * step;
        stress_tolerance += STRESS_TOLERANCE_WEIGHTS.for_answer(answer) * step;

        match answer {
            Answer::A => fast += 1,
            Answer::B => moderate += 1,
            Answer::C => slow += 1,
        }
    }

    let pace = majority_pace(fast, moderate, slow);

    tracing::trace!(
        "Computed profile from {} answers (fast={}, moderate={}, slow={})",
        answers.len(),
        fast,
        moderate,
        slow
    );

    // Profile::new clamps every dimension to [0, 100]
    Profile::new(analysis, execution, creativity, structure, autonomy, stress_tolerance, pace)
}

/// Pace with the strictly highest vote count, moderate otherwise
#[inline]
fn majority_pace(fast: usize, moderate: usize, slow: usize) -> Pace {
    if fast > moderate && fast > slow {
        Pace::Fast
    } else if slow > moderate && slow > fast {
        Pace::Slow
    } else {
        Pace::Moderate
    }
}
