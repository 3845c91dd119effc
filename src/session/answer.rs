/// Trim and lowercase. Nothing else is folded: no fuzzy matching, no width or
/// diacritic normalization.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

pub fn matches(input: &str, expected: &str) -> bool {
    normalize(input) == normalize(expected)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Incorrect,
}

impl Feedback {
    pub fn judge(input: &str, expected: &str) -> Self {
        if matches(input, expected) {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        }
    }

    pub fn is_pending(self) -> bool {
        self != Feedback::None
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn record(&mut self, feedback: Feedback) {
        debug_assert!(feedback.is_pending(), "recording an unjudged answer");
        self.total += 1;
        if feedback == Feedback::Correct {
            self.correct += 1;
        }
    }

    pub fn incorrect(&self) -> usize {
        self.total - self.correct
    }

    /// Accuracy in percent. An empty score reads as 0%.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grade {
    Perfect,
    Great,
    KeepPracticing,
}

impl Grade {
    pub fn from_score(score: &Score) -> Self {
        if score.correct == score.total {
            Grade::Perfect
        } else if score.correct * 5 >= score.total * 4 {
            Grade::Great
        } else {
            Grade::KeepPracticing
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Grade::Perfect => "Perfect run!",
            Grade::Great => "Great work!",
            Grade::KeepPracticing => "Keep practicing!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub score: Score,
    /// Accuracy rounded half up to a whole percent.
    pub accuracy_percent: u32,
    pub grade: Grade,
}

impl Summary {
    pub fn from_score(score: Score) -> Self {
        Self {
            score,
            accuracy_percent: score.accuracy().round() as u32,
            grade: Grade::from_score(&score),
        }
    }
}
