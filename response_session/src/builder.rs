use log::debug;

pub use crate::config::*;
use crate::{Clock, Session, SystemClock};

/// A builder for assembling the questions of a session.
///
/// ```
/// pub use response_session::builder::Builder;
/// pub use response_session::RankingQuestion;
/// # use response_session::SessionErrors;
///
/// let mut builder = Builder::new()
///     .questions(&[RankingQuestion::new("r1", "Order these", &["a", "b", "c"])]);
///
/// builder.question(RankingQuestion::new("r2", "And these", &["d", "e"]).with_correct(&[1, 0]));
///
/// let session = builder.build()?;
/// assert_eq!(session.question_count(), 2);
///
/// # Ok::<(), SessionErrors>(())
/// ```
#[derive(Debug, Clone)]
pub struct Builder<Q: Question> {
    pub(crate) _questions: Vec<Q>,
}

impl<Q: Question> Default for Builder<Q> {
    fn default() -> Self {
        Builder::new()
    }
}

impl<Q: Question> Builder<Q> {
    pub fn new() -> Builder<Q> {
        Builder {
            _questions: Vec::new(),
        }
    }

    pub fn questions(self, questions: &[Q]) -> Builder<Q> {
        let mut _questions = self._questions;
        _questions.extend_from_slice(questions);
        Builder { _questions }
    }

    /// Adds a question after the ones already present.
    pub fn question(&mut self, question: Q) {
        debug!("Builder: adding question {:?}", question.id());
        self._questions.push(question);
    }

    pub fn len(&self) -> usize {
        self._questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self._questions.is_empty()
    }

    pub fn build(self) -> Result<Session<Q, SystemClock>, SessionErrors> {
        Session::new(self._questions)
    }

    pub fn build_with_clock<C: Clock>(self, clock: C) -> Result<Session<Q, C>, SessionErrors> {
        Session::with_clock(self._questions, clock)
    }
}
