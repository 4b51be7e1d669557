// The interactive front-end: questions are printed and answers are read line by line.

use std::io::{BufRead, Write};

use crate::poll::{
    io_common::{parse_confidence, SurveyQuestion},
    *,
};

fn say<W: Write>(output: &mut W, s: &str) -> PollResult<()> {
    writeln!(output, "{}", s).context(WritingOutputSnafu {})
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, s: &str) -> PollResult<Option<String>> {
    write!(output, "{}", s).context(WritingOutputSnafu {})?;
    output.flush().context(WritingOutputSnafu {})?;
    let mut line = String::new();
    let n = input.read_line(&mut line).context(ReadingInputSnafu {})?;
    if n == 0 {
        // End of input
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

// Asks until the answer is one of the codes. Returns None at the end of input.
fn ask_choice<R: BufRead, W: Write, T: Copy>(
    input: &mut R,
    output: &mut W,
    question: &str,
    choices: &[(T, &str)],
) -> PollResult<Option<T>> {
    say(output, question)?;
    for (idx, (_, label)) in choices.iter().enumerate() {
        say(output, &format!("  {}) {}", idx + 1, label))?;
    }
    loop {
        let line = match prompt(input, output, "> ")? {
            Some(l) => l,
            None => return Ok(None),
        };
        match line.parse::<usize>() {
            Ok(n) if n >= 1 && n <= choices.len() => return Ok(Some(choices[n - 1].0)),
            _ => say(output, &format!("Please type a number between 1 and {}", choices.len()))?,
        }
    }
}

/// Runs the demographic questionnaire. Returns None if the input ends first.
pub fn ask_demographics<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> PollResult<Option<DemographicProfile>> {
    say(output, "Please answer these brief questions before starting.")?;
    let experience: Vec<(AiExperience, &str)> =
        AiExperience::ALL.iter().map(|x| (*x, x.label())).collect();
    let frequency: Vec<(AiFrequency, &str)> =
        AiFrequency::ALL.iter().map(|x| (*x, x.label())).collect();
    let trust: Vec<(AiTrust, &str)> = AiTrust::ALL.iter().map(|x| (*x, x.label())).collect();

    let ai_experience = ask_choice(
        input,
        output,
        "How would you rate your familiarity with AI technology?",
        &experience,
    )?;
    let ai_frequency = ask_choice(
        input,
        output,
        "How frequently do you use AI tools (like ChatGPT, Midjourney, etc.)?",
        &frequency,
    )?;
    let ai_trust = ask_choice(
        input,
        output,
        "How much would you trust AI to make important decisions?",
        &trust,
    )?;

    let mut profile = DemographicProfile::new();
    profile.set_response(DemographicUpdate {
        ai_experience,
        ai_frequency,
        ai_trust,
    });
    if !profile.is_filled() {
        return Ok(None);
    }
    profile.complete().context(SessionSnafu {})?;
    Ok(Some(profile))
}

/// Asks the questions until the session is completed.
///
/// Returns false if the participant quits or the input ends before the end.
pub fn run_interactive<Q: SurveyQuestion, C: Clock, R: BufRead, W: Write>(
    session: &mut Session<Q, C>,
    input: &mut R,
    output: &mut W,
) -> PollResult<bool> {
    say(
        output,
        "Commands: :prev (previous question), :next (next question), :reset, :quit",
    )?;
    loop {
        let (idx, question) = match (session.current_index(), session.current_question()) {
            (Some(idx), Some(q)) => (idx, q.clone()),
            _ => return Ok(true),
        };
        say(output, "")?;
        say(
            output,
            &format!(
                "Question {} of {} ({:.0}%)",
                idx + 1,
                session.question_count(),
                session.progress()
            ),
        )?;
        say(output, &question.render())?;
        if let Some(previous) = session.response_for(question.id()) {
            say(
                output,
                &format!(
                    "Your previous answer: {} (confidence {})",
                    Q::answer_to_json(&previous.answer),
                    previous.confidence.value()
                ),
            )?;
        }

        let line = match prompt(input, output, &format!("Answer ({}): ", question.answer_hint()))? {
            Some(l) => l,
            None => return Ok(false),
        };
        let answer = match line.as_str() {
            ":quit" => return Ok(false),
            ":prev" => {
                session.go_to_previous();
                continue;
            }
            ":next" => {
                session.go_to_next();
                continue;
            }
            ":reset" => {
                session.reset();
                continue;
            }
            s => match question.parse_answer(s) {
                Ok(a) => a,
                Err(e) => {
                    say(output, &format!("{}", e))?;
                    continue;
                }
            },
        };
        if let Err(e) = question.check_answer(&answer) {
            say(output, &format!("{}", e))?;
            continue;
        }

        let confidence = loop {
            let line = match prompt(
                input,
                output,
                "How confident are you in your answer? (1 very uncertain - 5 very confident) [3]: ",
            )? {
                Some(l) => l,
                None => return Ok(false),
            };
            match parse_confidence(&line) {
                Ok(c) => break c,
                Err(e) => say(output, &format!("{}", e))?,
            }
        };
        let comment = match prompt(input, output, "Additional comments (optional): ")? {
            Some(l) => l,
            None => return Ok(false),
        };

        let submission = Submission {
            answer,
            confidence,
            comment: Some(comment),
        };
        if let Err(e) = session.submit_response(submission) {
            say(output, &format!("{}", e))?;
        }
    }
}

pub fn print_summary<W: Write>(output: &mut W, summary: &SurveySummary) -> PollResult<()> {
    say(output, "")?;
    say(output, "Thank you for participating in this research!")?;
    say(
        output,
        &format!(
            "Accuracy: {:.0}% ({} of {} correct)",
            summary.accuracy, summary.correct, summary.question_count
        ),
    )?;
    if let Some(partial) = summary.partial_correctness {
        say(output, &format!("Partial correctness: {:.1}%", partial))?;
    }
    if let Some(c) = summary.average_confidence {
        say(output, &format!("Average confidence: {:.1} out of 5", c))?;
    }
    say(
        output,
        &format!(
            "Confidence when correct: {:.1}, when incorrect: {:.1}",
            summary.confidence_when_correct, summary.confidence_when_incorrect
        ),
    )?;
    say(
        output,
        &format!(
            "Average time per question: {:.1}s (total: {:.0}s)",
            summary.average_time_per_question, summary.total_time_spent
        ),
    )
}
