// Replays a recorded list of actions against a session.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value as JSValue;

use crate::poll::{config_reader::DemographicsSource, io_common::SurveyQuestion, *};

#[derive(PartialEq, Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ScriptAction {
    Submit {
        seconds: Option<f64>,
        answer: JSValue,
        confidence: Option<u8>,
        comment: Option<String>,
    },
    Next {
        seconds: Option<f64>,
    },
    Previous {
        seconds: Option<f64>,
    },
    Reset {
        seconds: Option<f64>,
    },
}

impl ScriptAction {
    fn seconds(&self) -> Option<f64> {
        match self {
            ScriptAction::Submit { seconds, .. }
            | ScriptAction::Next { seconds }
            | ScriptAction::Previous { seconds }
            | ScriptAction::Reset { seconds } => *seconds,
        }
    }
}

#[derive(PartialEq, Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(rename = "startedAt")]
    pub started_at: Option<String>,
    pub demographics: Option<DemographicsSource>,
    pub actions: Vec<ScriptAction>,
}

impl Script {
    /// The instant the replay clock starts at.
    pub fn start_time(&self) -> PollResult<DateTime<Utc>> {
        match &self.started_at {
            Some(s) => {
                let t = DateTime::parse_from_rfc3339(s).context(ParsingTimestampSnafu {
                    timestamp: s.clone(),
                })?;
                Ok(t.with_timezone(&Utc))
            }
            None => Ok(Utc::now()),
        }
    }
}

pub fn read_script(path: &str) -> PollResult<Script> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let script: Script = serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    info!(
        "read_script: {} actions from {:?}",
        script.actions.len(),
        path
    );
    Ok(script)
}

/// Applies the actions in order.
///
/// The clock is moved forward by the `seconds` of each action before applying
/// it. Replaying stops at the first action that the session rejects.
pub fn replay<Q: SurveyQuestion>(
    session: &mut Session<Q, ManualClock>,
    actions: &[ScriptAction],
) -> PollResult<()> {
    for (idx, action) in actions.iter().enumerate() {
        debug!("replay: action {}: {:?}", idx, action);
        if let Some(secs) = action.seconds() {
            session.clock().advance_secs(secs);
        }
        match action {
            ScriptAction::Submit {
                answer,
                confidence,
                comment,
                ..
            } => {
                let question = session
                    .current_question()
                    .cloned()
                    .context(ReplaySnafu { index: idx })?;
                let answer = question.answer_from_json(answer)?;
                let confidence = match confidence {
                    Some(c) => ConfidenceLevel::new(*c).context(SessionSnafu {})?,
                    None => ConfidenceLevel::DEFAULT,
                };
                let submission = Submission {
                    answer,
                    confidence,
                    comment: comment.clone(),
                };
                session.submit_response(submission).context(SessionSnafu {})?;
            }
            ScriptAction::Next { .. } => session.go_to_next(),
            ScriptAction::Previous { .. } => session.go_to_previous(),
            ScriptAction::Reset { .. } => session.reset(),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session() -> Session<BinaryQuestion, ManualClock> {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
        Session::with_clock(response_session::samples::binary_questions(), clock).unwrap()
    }

    #[test]
    fn parses_actions() {
        let js = r#"{
            "startedAt": "2024-05-01T12:00:00+02:00",
            "actions": [
                {"action": "submit", "seconds": 4, "answer": 2, "confidence": 4},
                {"action": "previous"},
                {"action": "next", "seconds": 1.5},
                {"action": "reset"}
            ]
        }"#;
        let script: Script = serde_json::from_str(js).unwrap();
        assert_eq!(script.actions.len(), 4);
        assert_eq!(script.actions[0].seconds(), Some(4.0));
        assert_eq!(script.actions[1], ScriptAction::Previous { seconds: None });
        assert_eq!(script.actions[2].seconds(), Some(1.5));
        assert_eq!(
            script.start_time().unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
        );
        assert!(script.demographics.is_none());
    }

    #[test]
    fn rejects_unknown_actions() {
        let js = r#"{"actions": [{"action": "jump"}]}"#;
        assert!(serde_json::from_str::<Script>(js).is_err());
    }

    #[test]
    fn replays_submissions_and_navigation() {
        let mut s = session();
        let actions = vec![
            ScriptAction::Submit {
                seconds: Some(3.0),
                answer: serde_json::json!(1),
                confidence: None,
                comment: Some("first try".to_string()),
            },
            ScriptAction::Previous { seconds: None },
            ScriptAction::Submit {
                seconds: Some(2.0),
                answer: serde_json::json!(2),
                confidence: Some(5),
                comment: None,
            },
        ];
        replay(&mut s, &actions).unwrap();
        assert_eq!(s.current_index(), Some(1));
        assert_eq!(s.response_count(), 1);
        let r = s.response_for("q1").unwrap();
        assert_eq!(r.answer, OptionChoice::Second);
        assert_eq!(r.time_spent, 2.0);
        assert_eq!(r.confidence.value(), 5);
    }

    #[test]
    fn stops_on_rejected_action() {
        let mut s = session();
        let actions = vec![ScriptAction::Submit {
            seconds: None,
            answer: serde_json::json!(1),
            confidence: Some(9),
            comment: None,
        }];
        assert!(replay(&mut s, &actions).is_err());
        assert_eq!(s.response_count(), 0);
    }

    #[test]
    fn submitting_after_completion_fails() {
        let mut s = session();
        let mut actions: Vec<ScriptAction> = (0..7)
            .map(|_| ScriptAction::Submit {
                seconds: None,
                answer: serde_json::json!(2),
                confidence: None,
                comment: None,
            })
            .collect();
        assert!(replay(&mut s, &actions[..6]).is_ok());
        assert!(s.is_completed());
        actions.truncate(1);
        assert!(replay(&mut s, &actions).is_err());
    }
}
