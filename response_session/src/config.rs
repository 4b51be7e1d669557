// ********* Input data structures ***********

use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Debug, Display};

/// One of the two options of a binary question.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum OptionChoice {
    First,
    Second,
}

impl OptionChoice {
    /// Reads the 1-based option number used by forms and survey files.
    pub fn from_number(n: u8) -> Result<OptionChoice, SessionErrors> {
        match n {
            1 => Ok(OptionChoice::First),
            2 => Ok(OptionChoice::Second),
            x => Err(SessionErrors::InvalidOption(x)),
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            OptionChoice::First => 1,
            OptionChoice::Second => 2,
        }
    }
}

/// Self-reported certainty, from 1 (very uncertain) to 5 (very confident).
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct ConfidenceLevel(u8);

impl ConfidenceLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    /// The value pre-selected when a question is first shown.
    pub const DEFAULT: ConfidenceLevel = ConfidenceLevel(3);

    pub fn new(level: u8) -> Result<ConfidenceLevel, SessionErrors> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(ConfidenceLevel(level))
        } else {
            Err(SessionErrors::InvalidConfidence(level))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Very Uncertain",
            2 => "Somewhat Uncertain",
            3 => "Neutral",
            4 => "Somewhat Confident",
            _ => "Very Confident",
        }
    }
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        ConfidenceLevel::DEFAULT
    }
}

/// The behaviour shared by all the kinds of questions a session can present.
///
/// The session itself does not know the shape of the answers: it only asks the
/// question to check them before recording a response.
pub trait Question: Clone + Debug {
    type Answer: Clone + Debug + PartialEq;

    /// Whether the kind of question supports partial credit in the summary.
    const SCORES_PARTIAL: bool = false;

    fn id(&self) -> &str;

    fn statement(&self) -> &str;

    fn explanation(&self) -> Option<&str>;

    /// Rejects answers that cannot be recorded for this question.
    fn check_answer(&self, answer: &Self::Answer) -> Result<(), SessionErrors>;

    /// `None` when the question does not define a correct answer.
    fn is_correct(&self, answer: &Self::Answer) -> Option<bool>;

    /// Percentage of credit for a partially correct answer.
    fn partial_credit(&self, _answer: &Self::Answer) -> Option<f64> {
        None
    }
}

/// A question with two options, one of which may be marked correct.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BinaryQuestion {
    pub id: String,
    pub statement: String,
    pub option1: String,
    pub option2: String,
    pub correct_option: Option<OptionChoice>,
    pub explanation: Option<String>,
}

impl BinaryQuestion {
    pub fn new(id: &str, statement: &str, option1: &str, option2: &str) -> BinaryQuestion {
        BinaryQuestion {
            id: id.to_string(),
            statement: statement.to_string(),
            option1: option1.to_string(),
            option2: option2.to_string(),
            correct_option: None,
            explanation: None,
        }
    }

    pub fn with_correct(self, correct: OptionChoice) -> BinaryQuestion {
        BinaryQuestion {
            correct_option: Some(correct),
            ..self
        }
    }

    pub fn with_explanation(self, explanation: &str) -> BinaryQuestion {
        BinaryQuestion {
            explanation: Some(explanation.to_string()),
            ..self
        }
    }

    pub fn option_text(&self, choice: OptionChoice) -> &str {
        match choice {
            OptionChoice::First => &self.option1,
            OptionChoice::Second => &self.option2,
        }
    }
}

impl Question for BinaryQuestion {
    type Answer = OptionChoice;

    fn id(&self) -> &str {
        &self.id
    }

    fn statement(&self) -> &str {
        &self.statement
    }

    fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    // Both variants of OptionChoice are valid selections.
    fn check_answer(&self, _answer: &OptionChoice) -> Result<(), SessionErrors> {
        Ok(())
    }

    fn is_correct(&self, answer: &OptionChoice) -> Option<bool> {
        self.correct_option.map(|c| c == *answer)
    }
}

/// A question asking to order a list of options.
///
/// Rankings are lists of option indices, the most highly ranked option first.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankingQuestion {
    pub id: String,
    pub statement: String,
    pub options: Vec<String>,
    pub correct_ranking: Option<Vec<usize>>,
    pub explanation: Option<String>,
}

impl RankingQuestion {
    pub fn new(id: &str, statement: &str, options: &[&str]) -> RankingQuestion {
        RankingQuestion {
            id: id.to_string(),
            statement: statement.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_ranking: None,
            explanation: None,
        }
    }

    pub fn with_correct(self, ranking: &[usize]) -> RankingQuestion {
        RankingQuestion {
            correct_ranking: Some(ranking.to_vec()),
            ..self
        }
    }

    pub fn with_explanation(self, explanation: &str) -> RankingQuestion {
        RankingQuestion {
            explanation: Some(explanation.to_string()),
            ..self
        }
    }

    /// The order in which the options are shown before the participant moves them.
    pub fn initial_ranking(&self) -> Vec<usize> {
        (0..self.options.len()).collect()
    }

    /// True if the ranking mentions every option exactly once.
    pub fn is_permutation(&self, ranking: &[usize]) -> bool {
        if ranking.len() != self.options.len() {
            return false;
        }
        let mut seen = vec![false; self.options.len()];
        for &idx in ranking {
            match seen.get_mut(idx) {
                Some(s) if !*s => *s = true,
                _ => return false,
            }
        }
        true
    }
}

impl Question for RankingQuestion {
    type Answer = Vec<usize>;

    const SCORES_PARTIAL: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn statement(&self) -> &str {
        &self.statement
    }

    fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    fn check_answer(&self, answer: &Vec<usize>) -> Result<(), SessionErrors> {
        if self.is_permutation(answer) {
            Ok(())
        } else {
            Err(SessionErrors::InvalidRanking(self.id.clone()))
        }
    }

    fn is_correct(&self, answer: &Vec<usize>) -> Option<bool> {
        self.correct_ranking.as_ref().map(|c| c == answer)
    }

    fn partial_credit(&self, answer: &Vec<usize>) -> Option<f64> {
        // No reference ranking: no credit.
        let credit = match &self.correct_ranking {
            Some(correct) => crate::scoring::pairwise_concordance(answer, correct),
            None => 0.0,
        };
        Some(credit)
    }
}

/// What the presentation layer forwards when the participant submits a form.
#[derive(PartialEq, Debug, Clone)]
pub struct Submission<A> {
    pub answer: A,
    pub confidence: ConfidenceLevel,
    pub comment: Option<String>,
}

impl<A> Submission<A> {
    pub fn new(answer: A, confidence: ConfidenceLevel) -> Submission<A> {
        Submission {
            answer,
            confidence,
            comment: None,
        }
    }

    pub fn with_comment(self, comment: &str) -> Submission<A> {
        Submission {
            comment: Some(comment.to_string()),
            ..self
        }
    }
}

// ******** Output data structures *********

/// A recorded answer to one question.
#[derive(PartialEq, Debug, Clone)]
pub struct Response<A> {
    pub question_id: String,
    pub answer: A,
    pub confidence: ConfidenceLevel,
    pub comment: Option<String>,
    /// Seconds between showing the question and submitting the answer.
    pub time_spent: f64,
}

/// The snapshot taken when the last question is answered.
#[derive(PartialEq, Debug, Clone)]
pub struct SessionResults<A> {
    /// In question order.
    pub responses: Vec<Response<A>>,
    pub total_time_spent: f64,
    pub completed_at: DateTime<Utc>,
}

#[derive(PartialEq, Debug, Clone)]
pub enum SessionState<A> {
    InProgress(usize),
    Completed(SessionResults<A>),
}

/// Errors that prevent an action from being applied to a session.
///
/// The session is left untouched when one of these is returned.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SessionErrors {
    EmptySurvey,
    DuplicateQuestion(String),
    InvalidConfidence(u8),
    InvalidOption(u8),
    InvalidRanking(String),
    SessionCompleted,
    IncompleteDemographics,
    UnknownDemographicCode(String),
}

impl Error for SessionErrors {}

impl Display for SessionErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionErrors::EmptySurvey => write!(f, "the survey has no questions"),
            SessionErrors::DuplicateQuestion(id) => {
                write!(f, "question id {:?} is used more than once", id)
            }
            SessionErrors::InvalidConfidence(x) => write!(
                f,
                "confidence must be between {} and {}, got {}",
                ConfidenceLevel::MIN,
                ConfidenceLevel::MAX,
                x
            ),
            SessionErrors::InvalidOption(x) => write!(f, "option must be 1 or 2, got {}", x),
            SessionErrors::InvalidRanking(id) => {
                write!(f, "ranking for question {:?} is not a complete permutation", id)
            }
            SessionErrors::SessionCompleted => {
                write!(f, "the session is completed, reset it to answer again")
            }
            SessionErrors::IncompleteDemographics => {
                write!(f, "all the demographic questions must be answered")
            }
            SessionErrors::UnknownDemographicCode(code) => {
                write!(f, "unknown demographic answer {:?}", code)
            }
        }
    }
}
