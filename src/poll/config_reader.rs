use crate::poll::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "surveyName")]
    pub survey_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

/// The header of a report.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub survey: String,
    pub kind: String,
    pub questions: usize,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSource {
    pub id: String,
    pub statement: String,
    pub options: Vec<String>,
    #[serde(rename = "correctOption")]
    pub correct_option: Option<u8>,
    #[serde(rename = "correctRanking")]
    pub correct_ranking: Option<Vec<usize>>,
    pub explanation: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    pub kind: String,
    pub questions: Vec<QuestionSource>,
}

impl SurveyConfig {
    pub fn survey_kind(&self) -> PollResult<SurveyKind> {
        SurveyKind::parse(&self.kind)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DemographicsSource {
    #[serde(rename = "aiExperience")]
    pub ai_experience: Option<String>,
    #[serde(rename = "aiFrequency")]
    pub ai_frequency: Option<String>,
    #[serde(rename = "aiTrust")]
    pub ai_trust: Option<String>,
}

impl DemographicsSource {
    /// Fills and completes a profile. All the answers must be present.
    pub fn to_profile(&self) -> PollResult<DemographicProfile> {
        let mut profile = DemographicProfile::new();
        profile.set_response(DemographicUpdate {
            ai_experience: self
                .ai_experience
                .as_deref()
                .map(AiExperience::from_code)
                .transpose()
                .context(SessionSnafu {})?,
            ai_frequency: self
                .ai_frequency
                .as_deref()
                .map(AiFrequency::from_code)
                .transpose()
                .context(SessionSnafu {})?,
            ai_trust: self
                .ai_trust
                .as_deref()
                .map(AiTrust::from_code)
                .transpose()
                .context(SessionSnafu {})?,
        });
        profile.complete().context(SessionSnafu {})?;
        Ok(profile)
    }
}

pub fn read_json_file(path: &str) -> PollResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

pub fn read_config(path: &str) -> PollResult<SurveyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: SurveyConfig =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}
