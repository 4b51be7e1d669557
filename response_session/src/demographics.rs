//! The short questionnaire answered before the research activity.

use log::{debug, info};

use crate::config::SessionErrors;

/// Self-assessed familiarity with AI technology.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum AiExperience {
    Novice,
    Basic,
    Intermediate,
    Advanced,
}

/// How often AI tools are used.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum AiFrequency {
    Never,
    Rarely,
    Occasionally,
    Daily,
}

/// How much AI would be trusted to make important decisions.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum AiTrust {
    NoTrust,
    LittleTrust,
    Neutral,
    FullTrust,
}

// The codes are the values submitted by the questionnaire form.
impl AiExperience {
    pub const ALL: [AiExperience; 4] = [
        AiExperience::Novice,
        AiExperience::Basic,
        AiExperience::Intermediate,
        AiExperience::Advanced,
    ];

    pub fn from_code(code: &str) -> Result<AiExperience, SessionErrors> {
        AiExperience::ALL
            .iter()
            .find(|x| x.code() == code)
            .cloned()
            .ok_or_else(|| SessionErrors::UnknownDemographicCode(code.to_string()))
    }

    pub fn code(&self) -> &'static str {
        match self {
            AiExperience::Novice => "novice",
            AiExperience::Basic => "basic",
            AiExperience::Intermediate => "intermediate",
            AiExperience::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AiExperience::Novice => "Novice - Little to no knowledge",
            AiExperience::Basic => "Basic understanding",
            AiExperience::Intermediate => "Intermediate - Good working knowledge",
            AiExperience::Advanced => "Advanced - Expert knowledge",
        }
    }
}

impl AiFrequency {
    pub const ALL: [AiFrequency; 4] = [
        AiFrequency::Never,
        AiFrequency::Rarely,
        AiFrequency::Occasionally,
        AiFrequency::Daily,
    ];

    pub fn from_code(code: &str) -> Result<AiFrequency, SessionErrors> {
        AiFrequency::ALL
            .iter()
            .find(|x| x.code() == code)
            .cloned()
            .ok_or_else(|| SessionErrors::UnknownDemographicCode(code.to_string()))
    }

    pub fn code(&self) -> &'static str {
        match self {
            AiFrequency::Never => "never",
            AiFrequency::Rarely => "rarely",
            AiFrequency::Occasionally => "occasionally",
            AiFrequency::Daily => "daily",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AiFrequency::Never => "Never used",
            AiFrequency::Rarely => "Rarely (few times a year)",
            AiFrequency::Occasionally => "Occasionally (few times a month)",
            AiFrequency::Daily => "Daily (every day)",
        }
    }
}

impl AiTrust {
    pub const ALL: [AiTrust; 4] = [
        AiTrust::NoTrust,
        AiTrust::LittleTrust,
        AiTrust::Neutral,
        AiTrust::FullTrust,
    ];

    pub fn from_code(code: &str) -> Result<AiTrust, SessionErrors> {
        AiTrust::ALL
            .iter()
            .find(|x| x.code() == code)
            .cloned()
            .ok_or_else(|| SessionErrors::UnknownDemographicCode(code.to_string()))
    }

    pub fn code(&self) -> &'static str {
        match self {
            AiTrust::NoTrust => "notrust",
            AiTrust::LittleTrust => "littletrust",
            AiTrust::Neutral => "neutral",
            AiTrust::FullTrust => "fulltrust",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AiTrust::NoTrust => "No trust at all",
            AiTrust::LittleTrust => "Little trust",
            AiTrust::Neutral => "Neutral",
            AiTrust::FullTrust => "Full trust",
        }
    }
}

/// A partial set of answers. Missing fields leave the profile unchanged.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct DemographicUpdate {
    pub ai_experience: Option<AiExperience>,
    pub ai_frequency: Option<AiFrequency>,
    pub ai_trust: Option<AiTrust>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct DemographicProfile {
    pub ai_experience: Option<AiExperience>,
    pub ai_frequency: Option<AiFrequency>,
    pub ai_trust: Option<AiTrust>,
    completed: bool,
}

impl DemographicProfile {
    pub fn new() -> DemographicProfile {
        DemographicProfile::default()
    }

    pub fn set_response(&mut self, update: DemographicUpdate) {
        debug!("set_response: {:?}", update);
        if update.ai_experience.is_some() {
            self.ai_experience = update.ai_experience;
        }
        if update.ai_frequency.is_some() {
            self.ai_frequency = update.ai_frequency;
        }
        if update.ai_trust.is_some() {
            self.ai_trust = update.ai_trust;
        }
    }

    pub fn is_filled(&self) -> bool {
        self.ai_experience.is_some() && self.ai_frequency.is_some() && self.ai_trust.is_some()
    }

    /// Marks the questionnaire as done. Every question must have an answer.
    pub fn complete(&mut self) -> Result<(), SessionErrors> {
        if !self.is_filled() {
            return Err(SessionErrors::IncompleteDemographics);
        }
        info!("Demographic questionnaire completed: {:?}", self);
        self.completed = true;
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}
