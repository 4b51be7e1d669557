mod config;
pub mod builder;
pub mod demographics;
pub mod manual;
pub mod samples;
pub mod scoring;

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};

use std::{cell::Cell, collections::HashMap};

pub use crate::config::*;

// ********* Clocks **********

/// The source of time for a session.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Used to replay recorded sessions with the same timings.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> ManualClock {
        ManualClock {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, d: Duration) {
        self.now.set(self.now.get() + d);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::milliseconds((secs * 1000.0).round() as i64));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

// ********* Session **********

/// One participant's run through a list of questions.
///
/// The session records at most one response per question. Submitting an answer
/// moves to the next question; answering the last question completes the
/// session and takes a snapshot of the results. A completed session has to be
/// reset before it accepts answers again.
///
/// ```
/// use response_session::*;
///
/// let questions = vec![
///     BinaryQuestion::new("q1", "Pick one", "left", "right").with_correct(OptionChoice::Second),
///     BinaryQuestion::new("q2", "Pick again", "up", "down"),
/// ];
/// let mut session = Session::new(questions)?;
/// let confidence = ConfidenceLevel::new(4)?;
///
/// session.submit_response(Submission::new(OptionChoice::Second, confidence))?;
/// assert_eq!(session.current_index(), Some(1));
///
/// session.submit_response(Submission::new(OptionChoice::First, confidence))?;
/// assert!(session.is_completed());
/// assert_eq!(session.results().map(|r| r.responses.len()), Some(2));
/// # Ok::<(), SessionErrors>(())
/// ```
#[derive(Debug)]
pub struct Session<Q: Question, C: Clock = SystemClock> {
    questions: Vec<Q>,
    // Question id -> position in the list of questions.
    positions: HashMap<String, usize>,
    // One slot per question, in question order.
    responses: Vec<Option<Response<Q::Answer>>>,
    state: SessionState<Q::Answer>,
    shown_at: DateTime<Utc>,
    clock: C,
}

impl<Q: Question> Session<Q, SystemClock> {
    pub fn new(questions: Vec<Q>) -> Result<Session<Q, SystemClock>, SessionErrors> {
        Session::with_clock(questions, SystemClock)
    }
}

impl<Q: Question, C: Clock> Session<Q, C> {
    /// Creates a session positioned on the first question.
    ///
    /// Arguments:
    /// * `questions` the questions, in the order they are presented. They must
    /// not be empty and their identifiers must be unique.
    /// * `clock` the source of time for measuring answers.
    pub fn with_clock(questions: Vec<Q>, clock: C) -> Result<Session<Q, C>, SessionErrors> {
        if questions.is_empty() {
            return Err(SessionErrors::EmptySurvey);
        }
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (idx, q) in questions.iter().enumerate() {
            if positions.insert(q.id().to_string(), idx).is_some() {
                return Err(SessionErrors::DuplicateQuestion(q.id().to_string()));
            }
        }
        info!("Starting a session with {} questions", questions.len());
        let shown_at = clock.now();
        Ok(Session {
            responses: vec![None; questions.len()],
            questions,
            positions,
            state: SessionState::InProgress(0),
            shown_at,
            clock,
        })
    }

    pub fn questions(&self) -> &[Q] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn state(&self) -> &SessionState<Q::Answer> {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The position of the question being shown, or `None` once completed.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::InProgress(idx) => Some(idx),
            SessionState::Completed(_) => None,
        }
    }

    pub fn current_question(&self) -> Option<&Q> {
        self.current_index().and_then(|idx| self.questions.get(idx))
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, SessionState::Completed(_))
    }

    pub fn results(&self) -> Option<&SessionResults<Q::Answer>> {
        match &self.state {
            SessionState::Completed(res) => Some(res),
            SessionState::InProgress(_) => None,
        }
    }

    /// The recorded responses, in question order.
    pub fn responses(&self) -> impl Iterator<Item = &Response<Q::Answer>> {
        self.responses.iter().flatten()
    }

    pub fn response_count(&self) -> usize {
        self.responses().count()
    }

    /// The response already given to a question, used to pre-fill its form.
    pub fn response_for(&self, question_id: &str) -> Option<&Response<Q::Answer>> {
        self.positions
            .get(question_id)
            .and_then(|idx| self.responses[*idx].as_ref())
    }

    /// Percentage of the questions before the current one.
    pub fn progress(&self) -> f64 {
        match self.state {
            SessionState::InProgress(idx) => (idx as f64 / self.questions.len() as f64) * 100.0,
            SessionState::Completed(_) => 100.0,
        }
    }

    /// Records an answer for the current question and moves on.
    ///
    /// An earlier answer to the same question is replaced. Answering the last
    /// question completes the session. On error, nothing changes.
    pub fn submit_response(&mut self, submission: Submission<Q::Answer>) -> Result<(), SessionErrors> {
        let idx = match self.state {
            SessionState::InProgress(idx) => idx,
            SessionState::Completed(_) => {
                warn!("submit_response: session already completed");
                return Err(SessionErrors::SessionCompleted);
            }
        };
        let question = &self.questions[idx];
        if let Err(e) = question.check_answer(&submission.answer) {
            warn!("submit_response: rejected answer {:?}: {}", submission.answer, e);
            return Err(e);
        }

        let now = self.clock.now();
        let time_spent = (now - self.shown_at).num_milliseconds() as f64 / 1000.0;
        let comment = submission
            .comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let response = Response {
            question_id: question.id().to_string(),
            answer: submission.answer,
            confidence: submission.confidence,
            comment,
            time_spent,
        };
        let slot = &mut self.responses[idx];
        if slot.is_some() {
            debug!("submit_response: replacing the response to {:?}", response.question_id);
        } else {
            debug!("submit_response: recording the response to {:?}", response.question_id);
        }
        *slot = Some(response);

        if idx + 1 == self.questions.len() {
            self.complete(now);
        } else {
            self.move_to(idx + 1);
        }
        Ok(())
    }

    fn complete(&mut self, now: DateTime<Utc>) {
        let responses: Vec<Response<Q::Answer>> = self.responses().cloned().collect();
        let total_time_spent = responses.iter().map(|r| r.time_spent).sum();
        info!(
            "Session completed: {} responses, {:.1}s in total",
            responses.len(),
            total_time_spent
        );
        self.state = SessionState::Completed(SessionResults {
            responses,
            total_time_spent,
            completed_at: now,
        });
    }

    fn move_to(&mut self, idx: usize) {
        debug!("move_to: question {} of {}", idx + 1, self.questions.len());
        self.state = SessionState::InProgress(idx);
        self.shown_at = self.clock.now();
    }

    pub fn go_to_next(&mut self) {
        if let SessionState::InProgress(idx) = self.state {
            if idx + 1 < self.questions.len() {
                self.move_to(idx + 1);
            }
        }
    }

    pub fn go_to_previous(&mut self) {
        if let SessionState::InProgress(idx) = self.state {
            if idx > 0 {
                self.move_to(idx - 1);
            }
        }
    }

    /// Drops all the responses and starts again from the first question.
    pub fn reset(&mut self) {
        info!("Resetting the session");
        for slot in self.responses.iter_mut() {
            *slot = None;
        }
        self.move_to(0);
    }
}
