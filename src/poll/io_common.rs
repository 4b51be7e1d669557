// Conversions between the question types and their text / JSON forms.

use serde_json::json;
use serde_json::Value as JSValue;

use crate::poll::{config_reader::QuestionSource, *};

/// A question that can be read from a survey file, shown on a terminal and
/// answered from text or JSON.
pub trait SurveyQuestion: Question {
    const KIND: SurveyKind;

    fn from_source(source: &QuestionSource) -> PollResult<Self>;

    /// The statement and the options, as shown to the participant.
    fn render(&self) -> String;

    /// The hint shown at the answer prompt.
    fn answer_hint(&self) -> String;

    fn parse_answer(&self, s: &str) -> PollResult<Self::Answer>;

    fn answer_from_json(&self, v: &JSValue) -> PollResult<Self::Answer>;

    fn answer_to_json(answer: &Self::Answer) -> JSValue;
}

impl SurveyQuestion for BinaryQuestion {
    const KIND: SurveyKind = SurveyKind::Binary;

    fn from_source(source: &QuestionSource) -> PollResult<BinaryQuestion> {
        let (option1, option2) = match source.options.as_slice() {
            [o1, o2] => (o1, o2),
            _ => {
                return InvalidQuestionSnafu {
                    id: source.id.clone(),
                    message: format!(
                        "a binary question needs 2 options, found {}",
                        source.options.len()
                    ),
                }
                .fail()
            }
        };
        if source.correct_ranking.is_some() {
            warn!(
                "from_source: question {}: correctRanking is ignored for binary questions",
                source.id
            );
        }
        let correct_option = source
            .correct_option
            .map(OptionChoice::from_number)
            .transpose()
            .context(SessionSnafu {})?;
        Ok(BinaryQuestion {
            id: source.id.clone(),
            statement: source.statement.clone(),
            option1: option1.clone(),
            option2: option2.clone(),
            correct_option,
            explanation: source.explanation.clone(),
        })
    }

    fn render(&self) -> String {
        format!(
            "{}\n  1) {}\n  2) {}",
            self.statement, self.option1, self.option2
        )
    }

    fn answer_hint(&self) -> String {
        "1 or 2".to_string()
    }

    fn parse_answer(&self, s: &str) -> PollResult<OptionChoice> {
        let n = s
            .trim()
            .parse::<u8>()
            .ok()
            .context(InvalidAnswerSnafu { answer: s })?;
        OptionChoice::from_number(n).context(SessionSnafu {})
    }

    fn answer_from_json(&self, v: &JSValue) -> PollResult<OptionChoice> {
        let n = v
            .as_u64()
            .context(InvalidAnswerSnafu {
                answer: v.to_string(),
            })?;
        let n = u8::try_from(n).ok().context(InvalidAnswerSnafu {
            answer: v.to_string(),
        })?;
        OptionChoice::from_number(n).context(SessionSnafu {})
    }

    fn answer_to_json(answer: &OptionChoice) -> JSValue {
        json!(answer.number())
    }
}

impl SurveyQuestion for RankingQuestion {
    const KIND: SurveyKind = SurveyKind::Ranking;

    fn from_source(source: &QuestionSource) -> PollResult<RankingQuestion> {
        if source.options.len() < 2 {
            return InvalidQuestionSnafu {
                id: source.id.clone(),
                message: "a ranking question needs at least 2 options".to_string(),
            }
            .fail();
        }
        if source.correct_option.is_some() {
            warn!(
                "from_source: question {}: correctOption is ignored for ranking questions",
                source.id
            );
        }
        let q = RankingQuestion {
            id: source.id.clone(),
            statement: source.statement.clone(),
            options: source.options.clone(),
            correct_ranking: source.correct_ranking.clone(),
            explanation: source.explanation.clone(),
        };
        if let Some(correct) = &q.correct_ranking {
            if !q.is_permutation(correct) {
                return InvalidQuestionSnafu {
                    id: source.id.clone(),
                    message: format!("correctRanking {:?} is not a permutation", correct),
                }
                .fail();
            }
        }
        Ok(q)
    }

    fn render(&self) -> String {
        let mut s = self.statement.clone();
        for (idx, option) in self.options.iter().enumerate() {
            s.push_str(&format!("\n  {}) {}", idx, option));
        }
        s
    }

    fn answer_hint(&self) -> String {
        let example: Vec<String> = self
            .initial_ranking()
            .iter()
            .map(|x| x.to_string())
            .collect();
        format!("option numbers, best first, e.g. {}", example.join(","))
    }

    fn parse_answer(&self, s: &str) -> PollResult<Vec<usize>> {
        let mut ranking: Vec<usize> = Vec::new();
        for elt in s.split(',') {
            let idx = elt
                .trim()
                .parse::<usize>()
                .ok()
                .context(InvalidAnswerSnafu { answer: s })?;
            ranking.push(idx);
        }
        Ok(ranking)
    }

    fn answer_from_json(&self, v: &JSValue) -> PollResult<Vec<usize>> {
        let elts = v.as_array().context(InvalidAnswerSnafu {
            answer: v.to_string(),
        })?;
        let mut ranking: Vec<usize> = Vec::new();
        for elt in elts {
            let idx = elt
                .as_u64()
                .and_then(|x| usize::try_from(x).ok())
                .context(InvalidAnswerSnafu {
                    answer: v.to_string(),
                })?;
            ranking.push(idx);
        }
        Ok(ranking)
    }

    fn answer_to_json(answer: &Vec<usize>) -> JSValue {
        json!(answer)
    }
}

pub fn parse_confidence(s: &str) -> PollResult<ConfidenceLevel> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(ConfidenceLevel::DEFAULT);
    }
    let n = s
        .parse::<u8>()
        .ok()
        .context(InvalidAnswerSnafu { answer: s })?;
    ConfidenceLevel::new(n).context(SessionSnafu {})
}

pub fn build_questions<Q: SurveyQuestion>(sources: &[QuestionSource]) -> PollResult<Vec<Q>> {
    sources.iter().map(Q::from_source).collect()
}
