use serde::{Deserialize, Serialize};

use crate::assessment::QuestionnaireConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// TUI palette selection
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Question set and tier thresholds; omitted = built-in questionnaire
    #[serde(default)]
    pub questionnaire: Option<QuestionnaireConfig>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeConfig {
    #[default]
    Auto,
    Dark,
    Light,
}

impl Config {
    /// Config as written by `init`: the built-in questionnaire spelled out so it
    /// can be edited in place.
    pub fn reference() -> Self {
        Self {
            theme: ThemeConfig::Auto,
            questionnaire: Some(QuestionnaireConfig::reference()),
        }
    }

    pub fn questionnaire_or_default(&self) -> QuestionnaireConfig {
        self.questionnaire.clone().unwrap_or_default()
    }
}
