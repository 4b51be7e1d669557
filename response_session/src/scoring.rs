use log::debug;

use crate::config::*;

/// Percentage of concordant position pairs between two rankings.
///
/// For every pair of positions `i < j`, the pair is concordant when the
/// relative order of the values at these positions is the same in both
/// rankings. Rankings of different lengths share no credit.
///
/// ```
/// use response_session::scoring::pairwise_concordance;
///
/// assert_eq!(pairwise_concordance(&[3, 2, 0, 1], &[3, 2, 0, 1]), 100.0);
/// assert_eq!(pairwise_concordance(&[0, 1, 2, 3], &[3, 2, 1, 0]), 0.0);
/// ```
pub fn pairwise_concordance(submitted: &[usize], correct: &[usize]) -> f64 {
    if submitted.len() != correct.len() {
        return 0.0;
    }
    let n = submitted.len();
    if n < 2 {
        return if submitted == correct { 100.0 } else { 0.0 };
    }

    let mut concordant: u32 = 0;
    for i in 0..n - 1 {
        for j in i + 1..n {
            let submitted_order = submitted[i] < submitted[j];
            let correct_order = correct[i] < correct[j];
            if submitted_order == correct_order {
                concordant += 1;
            }
        }
    }
    let total_pairs = (n * (n - 1) / 2) as f64;
    (concordant as f64 / total_pairs) * 100.0
}

/// Aggregate statistics over a completed session, as shown on the results page.
#[derive(PartialEq, Debug, Clone)]
pub struct SurveySummary {
    pub question_count: usize,
    pub answered: usize,
    pub correct: usize,
    /// Percentage of correct answers over all the questions.
    pub accuracy: f64,
    pub average_confidence: Option<f64>,
    pub confidence_when_correct: f64,
    pub confidence_when_incorrect: f64,
    pub total_time_spent: f64,
    pub average_time_per_question: f64,
    /// Only for the kinds of questions that give partial credit.
    pub partial_correctness: Option<f64>,
}

fn mean_confidence<A>(responses: &[&Response<A>]) -> f64 {
    if responses.is_empty() {
        return 0.0;
    }
    let total: u32 = responses.iter().map(|r| r.confidence.value() as u32).sum();
    total as f64 / responses.len() as f64
}

/// Computes the summary of a session.
///
/// Responses are matched to their question by identifier. Averages are taken
/// over the full question count, so unanswered questions count as wrong and
/// as taking no time.
pub fn summarize<Q: Question>(questions: &[Q], results: &SessionResults<Q::Answer>) -> SurveySummary {
    let question_count = questions.len();
    let find_question = |id: &str| questions.iter().find(|q| q.id() == id);

    let mut correct_responses: Vec<&Response<Q::Answer>> = Vec::new();
    let mut incorrect_responses: Vec<&Response<Q::Answer>> = Vec::new();
    let mut partial_total = 0.0;
    for r in results.responses.iter() {
        let q = match find_question(&r.question_id) {
            Some(q) => q,
            None => {
                debug!("summarize: no question for response {:?}", r.question_id);
                continue;
            }
        };
        match q.is_correct(&r.answer) {
            Some(true) => correct_responses.push(r),
            Some(false) => incorrect_responses.push(r),
            // No reference answer: neither correct nor incorrect.
            None => {}
        }
        partial_total += q.partial_credit(&r.answer).unwrap_or(0.0);
    }

    let per_question = |x: f64| {
        if question_count == 0 {
            0.0
        } else {
            x / question_count as f64
        }
    };

    let all_responses: Vec<&Response<Q::Answer>> = results.responses.iter().collect();
    let average_confidence = if all_responses.is_empty() {
        None
    } else {
        Some(mean_confidence(&all_responses))
    };

    let summary = SurveySummary {
        question_count,
        answered: results.responses.len(),
        correct: correct_responses.len(),
        accuracy: per_question(correct_responses.len() as f64 * 100.0),
        average_confidence,
        confidence_when_correct: mean_confidence(&correct_responses),
        confidence_when_incorrect: mean_confidence(&incorrect_responses),
        total_time_spent: results.total_time_spent,
        average_time_per_question: per_question(results.total_time_spent),
        partial_correctness: if Q::SCORES_PARTIAL {
            Some(per_question(partial_total))
        } else {
            None
        },
    };
    debug!("summarize: {:?}", summary);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn response<A>(id: &str, answer: A, confidence: u8, time_spent: f64) -> Response<A> {
        Response {
            question_id: id.to_string(),
            answer,
            confidence: ConfidenceLevel::new(confidence).unwrap(),
            comment: None,
            time_spent,
        }
    }

    fn results<A>(responses: Vec<Response<A>>) -> SessionResults<A> {
        let total_time_spent = responses.iter().map(|r| r.time_spent).sum();
        SessionResults {
            responses,
            total_time_spent,
            completed_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn concordance_identical_rankings() {
        assert_eq!(pairwise_concordance(&[3, 2, 0, 1], &[3, 2, 0, 1]), 100.0);
    }

    #[test]
    fn concordance_one_pair_out_of_six() {
        // Only the pair of positions (2, 3) keeps its relative order.
        let score = pairwise_concordance(&[0, 1, 2, 3], &[3, 2, 0, 1]);
        assert!((score - 100.0 / 6.0).abs() < 1e-9, "score: {}", score);
    }

    #[test]
    fn concordance_half_of_the_pairs() {
        assert_eq!(pairwise_concordance(&[0, 1, 2, 3], &[0, 3, 2, 1]), 50.0);
    }

    #[test]
    fn concordance_degenerate_rankings() {
        assert_eq!(pairwise_concordance(&[0], &[0]), 100.0);
        assert_eq!(pairwise_concordance(&[], &[]), 100.0);
        assert_eq!(pairwise_concordance(&[0, 1], &[0, 1, 2]), 0.0);
    }

    #[test]
    fn binary_summary() {
        let questions = vec![
            BinaryQuestion::new("q1", "s1", "a", "b").with_correct(OptionChoice::Second),
            BinaryQuestion::new("q2", "s2", "a", "b").with_correct(OptionChoice::Second),
            BinaryQuestion::new("q3", "s3", "a", "b").with_correct(OptionChoice::First),
            BinaryQuestion::new("q4", "s4", "a", "b"),
        ];
        let res = results(vec![
            response("q1", OptionChoice::Second, 5, 2.0),
            response("q2", OptionChoice::First, 2, 4.0),
            response("q3", OptionChoice::First, 3, 1.0),
            response("q4", OptionChoice::First, 4, 1.0),
        ]);
        let summary = summarize(&questions, &res);
        assert_eq!(summary.question_count, 4);
        assert_eq!(summary.answered, 4);
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.accuracy, 50.0);
        assert_eq!(summary.average_confidence, Some(3.5));
        assert_eq!(summary.confidence_when_correct, 4.0);
        // q4 has no correct option and does not count as incorrect.
        assert_eq!(summary.confidence_when_incorrect, 2.0);
        assert_eq!(summary.total_time_spent, 8.0);
        assert_eq!(summary.average_time_per_question, 2.0);
        assert_eq!(summary.partial_correctness, None);
    }

    #[test]
    fn ranking_summary() {
        let questions = vec![
            RankingQuestion::new("r1", "s1", &["a", "b", "c", "d"]).with_correct(&[3, 2, 0, 1]),
            RankingQuestion::new("r2", "s2", &["a", "b", "c", "d"]).with_correct(&[0, 3, 2, 1]),
        ];
        let res = results(vec![
            response("r1", vec![3, 2, 0, 1], 4, 3.0),
            response("r2", vec![0, 1, 2, 3], 2, 5.0),
        ]);
        let summary = summarize(&questions, &res);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.accuracy, 50.0);
        assert_eq!(summary.confidence_when_correct, 4.0);
        assert_eq!(summary.confidence_when_incorrect, 2.0);
        assert_eq!(summary.partial_correctness, Some(75.0));
        assert_eq!(summary.average_time_per_question, 4.0);
    }

    #[test]
    fn unanswered_questions_count_against_accuracy() {
        let questions = vec![
            BinaryQuestion::new("q1", "s1", "a", "b").with_correct(OptionChoice::First),
            BinaryQuestion::new("q2", "s2", "a", "b").with_correct(OptionChoice::First),
        ];
        let res = results(vec![response("q2", OptionChoice::First, 3, 6.0)]);
        let summary = summarize(&questions, &res);
        assert_eq!(summary.answered, 1);
        assert_eq!(summary.accuracy, 50.0);
        assert_eq!(summary.average_time_per_question, 3.0);
    }

    #[test]
    fn empty_results() {
        let questions = vec![BinaryQuestion::new("q1", "s1", "a", "b")];
        let summary = summarize(&questions, &results::<OptionChoice>(vec![]));
        assert_eq!(summary.average_confidence, None);
        assert_eq!(summary.confidence_when_correct, 0.0);
        assert_eq!(summary.accuracy, 0.0);
    }
}
