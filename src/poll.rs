use log::{debug, info, warn};

use response_session::demographics::*;
use response_session::scoring::{summarize, SurveySummary};
use response_session::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io;
use std::path::Path;

use chrono::SecondsFormat;
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::poll::config_reader::*;
use crate::poll::io_common::{build_questions, SurveyQuestion};

pub mod config_reader;
pub mod io_common;
pub mod io_script;
pub mod io_terminal;

#[derive(Debug, Snafu)]
pub enum PollError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson { source: std::io::Error, path: String },
    #[snafu(display("Error parsing the JSON content of {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the report"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Invalid timestamp {timestamp:?}"))]
    ParsingTimestamp {
        source: chrono::ParseError,
        timestamp: String,
    },
    #[snafu(display("Unknown survey kind {kind:?}, expected binary or ranking"))]
    UnknownSurveyKind { kind: String },
    #[snafu(display("Question {id}: {message}"))]
    InvalidQuestion { id: String, message: String },
    #[snafu(display("Could not understand the answer {answer:?}"))]
    InvalidAnswer { answer: String },
    #[snafu(display("Script action {index}: the session is already completed"))]
    Replay { index: usize },
    #[snafu(display("{source}"))]
    Session { source: SessionErrors },
    #[snafu(display("Error reading the input"))]
    ReadingInput { source: io::Error },
    #[snafu(display("Error writing the output"))]
    WritingOutput { source: io::Error },
    #[snafu(display("Difference detected between the report and the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type PollResult<T> = Result<T, PollError>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SurveyKind {
    Binary,
    Ranking,
}

impl SurveyKind {
    pub fn parse(s: &str) -> PollResult<SurveyKind> {
        match s {
            "binary" => Ok(SurveyKind::Binary),
            "ranking" => Ok(SurveyKind::Ranking),
            x => UnknownSurveyKindSnafu { kind: x }.fail(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SurveyKind::Binary => "binary",
            SurveyKind::Ranking => "ranking",
        }
    }
}

/// What to run, as given on the command line.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RunSettings {
    pub config_path: Option<String>,
    pub kind: Option<String>,
    pub script_path: Option<String>,
    pub reference_path: Option<String>,
    pub out: Option<String>,
    pub ask_demographics: bool,
}

fn response_to_json<Q: SurveyQuestion>(r: &Response<Q::Answer>) -> JSValue {
    json!({
        "questionId": r.question_id,
        "answer": Q::answer_to_json(&r.answer),
        "confidence": r.confidence.value(),
        "comment": r.comment,
        "timeSpent": r.time_spent,
    })
}

fn results_to_json<Q: SurveyQuestion>(results: &SessionResults<Q::Answer>) -> JSValue {
    let responses: Vec<JSValue> = results
        .responses
        .iter()
        .map(response_to_json::<Q>)
        .collect();
    json!({
        "responses": responses,
        "totalTimeSpent": results.total_time_spent,
        "completedAt": results.completed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

fn summary_to_json(summary: &SurveySummary) -> JSValue {
    json!({
        "questionCount": summary.question_count,
        "answered": summary.answered,
        "correct": summary.correct,
        "accuracy": summary.accuracy,
        "averageConfidence": summary.average_confidence,
        "confidenceWhenCorrect": summary.confidence_when_correct,
        "confidenceWhenIncorrect": summary.confidence_when_incorrect,
        "totalTimeSpent": summary.total_time_spent,
        "averageTimePerQuestion": summary.average_time_per_question,
        "partialCorrectness": summary.partial_correctness,
    })
}

fn demographics_to_json(profile: &DemographicProfile) -> JSValue {
    json!({
        "aiExperience": profile.ai_experience.map(|x| x.code()),
        "aiFrequency": profile.ai_frequency.map(|x| x.code()),
        "aiTrust": profile.ai_trust.map(|x| x.code()),
    })
}

fn build_report_js<Q: SurveyQuestion>(
    survey_name: &str,
    questions: &[Q],
    results: &SessionResults<Q::Answer>,
    demographics: Option<&DemographicProfile>,
) -> JSValue {
    let c = OutputConfig {
        survey: survey_name.to_string(),
        kind: Q::KIND.name().to_string(),
        questions: questions.len(),
    };
    let summary = summarize(questions, results);
    let mut report: JSMap<String, JSValue> = JSMap::new();
    report.insert("config".to_string(), json!(c));
    report.insert("results".to_string(), results_to_json::<Q>(results));
    report.insert("summary".to_string(), summary_to_json(&summary));
    if let Some(profile) = demographics {
        report.insert("demographics".to_string(), demographics_to_json(profile));
    }
    JSValue::Object(report)
}

/// The report location. A bare file name goes into the output directory of
/// the survey file, if it has one.
fn resolve_out(out: &str, output_directory: Option<&str>) -> String {
    match output_directory {
        Some(dir) if out != "stdout" && Path::new(out).components().count() == 1 => {
            Path::new(dir).join(out).to_string_lossy().to_string()
        }
        _ => out.to_string(),
    }
}

fn write_report(out: &str, pretty_js: &str) -> PollResult<()> {
    if out == "stdout" {
        println!("{}", pretty_js);
        Ok(())
    } else {
        info!("Writing the report to {:?}", out);
        fs::write(out, pretty_js).context(WritingOutputSnafu {})
    }
}

fn check_reference(reference_path: &str, pretty_js: &str) -> PollResult<()> {
    let reference = read_json_file(reference_path)?;
    let pretty_reference =
        serde_json::to_string_pretty(&reference).context(SerializingJsonSnafu {})?;
    if pretty_reference != pretty_js {
        warn!("Found differences with the reference report");
        print_diff(pretty_reference.as_str(), pretty_js, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("The report matches the reference {:?}", reference_path);
    Ok(())
}

fn finish<Q: SurveyQuestion>(
    survey_name: &str,
    questions: &[Q],
    results: &SessionResults<Q::Answer>,
    demographics: Option<&DemographicProfile>,
    settings: &RunSettings,
) -> PollResult<()> {
    let report = build_report_js(survey_name, questions, results, demographics);
    let pretty_js = serde_json::to_string_pretty(&report).context(SerializingJsonSnafu {})?;
    debug!("report: {}", pretty_js);

    if let Some(out) = &settings.out {
        write_report(out, &pretty_js)?;
    }
    if let Some(reference_path) = &settings.reference_path {
        check_reference(reference_path, &pretty_js)?;
    }
    Ok(())
}

fn run_scripted<Q: SurveyQuestion>(
    survey_name: &str,
    questions: Vec<Q>,
    script_path: &str,
    settings: &RunSettings,
) -> PollResult<()> {
    let script = io_script::read_script(script_path)?;
    let demographics = match &script.demographics {
        Some(d) => Some(d.to_profile()?),
        None => None,
    };
    let clock = ManualClock::new(script.start_time()?);
    let mut session = Session::with_clock(questions, clock).context(SessionSnafu {})?;
    io_script::replay(&mut session, &script.actions)?;

    match session.results() {
        Some(results) => finish(
            survey_name,
            session.questions(),
            results,
            demographics.as_ref(),
            settings,
        ),
        None => whatever!(
            "The script ended before the survey was completed ({} of {} questions answered)",
            session.response_count(),
            session.question_count()
        ),
    }
}

fn run_on_terminal<Q: SurveyQuestion>(
    survey_name: &str,
    questions: Vec<Q>,
    settings: &RunSettings,
) -> PollResult<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let demographics = if settings.ask_demographics {
        match io_terminal::ask_demographics(&mut input, &mut output)? {
            Some(p) => Some(p),
            None => {
                info!("The questionnaire was interrupted");
                return Ok(());
            }
        }
    } else {
        None
    };

    let mut session = Session::new(questions).context(SessionSnafu {})?;
    let completed = io_terminal::run_interactive(&mut session, &mut input, &mut output)?;
    let results = match (completed, session.results()) {
        (true, Some(results)) => results,
        _ => {
            info!(
                "The survey was interrupted after {} responses",
                session.response_count()
            );
            return Ok(());
        }
    };
    let summary = summarize(session.questions(), results);
    io_terminal::print_summary(&mut output, &summary)?;
    finish(
        survey_name,
        session.questions(),
        results,
        demographics.as_ref(),
        settings,
    )
}

fn run_kind<Q: SurveyQuestion>(
    survey_name: &str,
    questions: Vec<Q>,
    settings: &RunSettings,
) -> PollResult<()> {
    info!(
        "Survey {:?}: {} {} questions",
        survey_name,
        questions.len(),
        Q::KIND.name()
    );
    match &settings.script_path {
        Some(script_path) => run_scripted(survey_name, questions, script_path, settings),
        None => run_on_terminal(survey_name, questions, settings),
    }
}

/// Runs a survey from a survey file, or from the built-in questions.
pub fn run_survey(settings: &RunSettings) -> PollResult<()> {
    match &settings.config_path {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let name = config.output_settings.survey_name.as_str();
            let output_directory = config.output_settings.output_directory.as_deref();
            let settings = RunSettings {
                out: settings
                    .out
                    .as_deref()
                    .map(|out| resolve_out(out, output_directory)),
                ..settings.clone()
            };
            match config.survey_kind()? {
                SurveyKind::Binary => run_kind(
                    name,
                    build_questions::<BinaryQuestion>(&config.questions)?,
                    &settings,
                ),
                SurveyKind::Ranking => run_kind(
                    name,
                    build_questions::<RankingQuestion>(&config.questions)?,
                    &settings,
                ),
            }
        }
        None => {
            let kind = SurveyKind::parse(settings.kind.as_deref().unwrap_or("binary"))?;
            match kind {
                SurveyKind::Binary => run_kind(
                    "sample binary questions",
                    samples::binary_questions(),
                    settings,
                ),
                SurveyKind::Ranking => run_kind(
                    "sample ranking questions",
                    samples::ranking_questions(),
                    settings,
                ),
            }
        }
    }
}

#[cfg(test)]
fn run_survey_test(test_name: &str, with_config: bool, kind: Option<&str>) -> PollResult<()> {
    let test_dir = format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), test_name);
    info!("Running test {}", test_name);
    let settings = RunSettings {
        config_path: if with_config {
            Some(format!("{}/{}_config.json", test_dir, test_name))
        } else {
            None
        },
        kind: kind.map(|s| s.to_string()),
        script_path: Some(format!("{}/{}_script.json", test_dir, test_name)),
        reference_path: Some(format!("{}/{}_expected_summary.json", test_dir, test_name)),
        out: None,
        ask_demographics: false,
    };
    run_survey(&settings)
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) {
    let res = run_survey_test(test_name, true, None);
    if let Err(e) = &res {
        eprintln!("An error occured {}", e);
    }
    assert!(res.is_ok(), "{:?}", res);
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn binary_resubmission() {
        test_wrapper("binary_resubmission");
    }

    #[test]
    fn ranking_with_demographics() {
        test_wrapper("ranking_with_demographics");
    }

    #[test]
    fn sample_ranking_reset() {
        let res = run_survey_test("sample_ranking_reset", false, Some("ranking"));
        assert!(res.is_ok(), "{:?}", res);
    }

    #[test]
    fn resubmission_replaces_the_first_answer() {
        let test_dir = format!("{}/tests/data/binary_resubmission", env!("CARGO_MANIFEST_DIR"));
        let config = read_config(&format!("{}/binary_resubmission_config.json", test_dir)).unwrap();
        let script =
            io_script::read_script(&format!("{}/binary_resubmission_script.json", test_dir))
                .unwrap();
        let questions = build_questions::<BinaryQuestion>(&config.questions).unwrap();
        let clock = ManualClock::new(script.start_time().unwrap());
        let mut session = Session::with_clock(questions, clock).unwrap();
        io_script::replay(&mut session, &script.actions).unwrap();

        let results = session.results().unwrap();
        assert_eq!(results.responses.len(), 4);
        let first = &results.responses[0];
        assert_eq!(first.question_id, "q1");
        assert_eq!(first.answer, OptionChoice::Second);
        assert_eq!(first.confidence.value(), 4);
        assert_eq!(first.comment, None);
        assert_eq!(first.time_spent, 3.0);
        // q2 keeps its only answer.
        assert_eq!(results.responses[1].confidence.value(), 2);
        assert_eq!(results.responses[1].time_spent, 6.0);
    }

    #[test]
    fn report_goes_to_output_directory() {
        let out_dir = std::env::temp_dir().join(format!("pollrun_report_{}", std::process::id()));
        fs::create_dir_all(&out_dir).unwrap();
        let test_dir = format!("{}/tests/data/binary_resubmission", env!("CARGO_MANIFEST_DIR"));
        let mut config =
            read_json_file(&format!("{}/binary_resubmission_config.json", test_dir)).unwrap();
        config["outputSettings"]["outputDirectory"] = json!(out_dir.to_string_lossy());
        let config_path = out_dir.join("survey.json");
        fs::write(&config_path, config.to_string()).unwrap();

        let settings = RunSettings {
            config_path: Some(config_path.to_string_lossy().to_string()),
            script_path: Some(format!("{}/binary_resubmission_script.json", test_dir)),
            out: Some("report.json".to_string()),
            ..Default::default()
        };
        let res = run_survey(&settings);
        assert!(res.is_ok(), "{:?}", res);

        let written = read_json_file(&out_dir.join("report.json").to_string_lossy()).unwrap();
        let expected =
            read_json_file(&format!("{}/binary_resubmission_expected_summary.json", test_dir))
                .unwrap();
        assert_eq!(written, expected);
        fs::remove_dir_all(&out_dir).unwrap();
    }

    #[test]
    fn output_location() {
        assert_eq!(resolve_out("report.json", Some("reports")), "reports/report.json");
        assert_eq!(resolve_out("stdout", Some("reports")), "stdout");
        assert_eq!(resolve_out("other/report.json", Some("reports")), "other/report.json");
        assert_eq!(resolve_out("/tmp/report.json", Some("reports")), "/tmp/report.json");
        assert_eq!(resolve_out("report.json", None), "report.json");
    }

    #[test]
    fn incomplete_script() {
        let res = run_survey_test("incomplete_script", true, None);
        assert!(matches!(res, Err(PollError::Whatever { .. })), "{:?}", res);
    }

    #[test]
    fn reference_mismatch() {
        let res = run_survey_test("reference_mismatch", true, None);
        assert!(
            matches!(res, Err(PollError::ReferenceMismatch { .. })),
            "{:?}",
            res
        );
    }

    #[test]
    fn unknown_kind() {
        let settings = RunSettings {
            kind: Some("likert".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            run_survey(&settings),
            Err(PollError::UnknownSurveyKind { .. })
        ));
    }

    #[test]
    fn missing_config_file() {
        let settings = RunSettings {
            config_path: Some("/nonexistent/survey.json".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            run_survey(&settings),
            Err(PollError::OpeningJson { .. })
        ));
    }

    #[test]
    fn report_layout() {
        let questions =
            vec![BinaryQuestion::new("q1", "s", "a", "b").with_correct(OptionChoice::First)];
        let started = chrono::DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let mut session = Session::with_clock(questions, ManualClock::new(started)).unwrap();
        session.clock().advance_secs(2.5);
        let confidence = ConfidenceLevel::new(5).unwrap();
        session
            .submit_response(Submission::new(OptionChoice::First, confidence))
            .unwrap();
        let report = build_report_js("unit", session.questions(), session.results().unwrap(), None);
        assert_eq!(
            report["config"],
            json!({"survey": "unit", "kind": "binary", "questions": 1})
        );
        assert_eq!(report["results"]["completedAt"], json!("2024-05-01T10:00:02Z"));
        assert_eq!(report["results"]["responses"][0]["timeSpent"], json!(2.5));
        assert_eq!(report["summary"]["accuracy"], json!(100.0));
        assert_eq!(report["summary"]["partialCorrectness"], JSValue::Null);
        assert!(report.get("demographics").is_none());
    }
}
