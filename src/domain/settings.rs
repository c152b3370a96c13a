use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => anyhow::bail!("Invalid theme: {}. Must be 'light' or 'dark'", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Ar)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Ar => write!(f, "ar"),
        }
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            _ => anyhow::bail!("Invalid language: {}. Must be 'en' or 'ar'", s),
        }
    }
}

/// The single source of truth for user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub language: Language,
    pub theme: Theme,
    pub risk_tolerance: f64,
    pub default_pairs: Vec<String>,
    pub notifications: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            language: Language::En,
            theme: Theme::Dark,
            risk_tolerance: 0.5,
            default_pairs: vec![
                "EURUSD".to_string(),
                "GBPUSD".to_string(),
                "USDJPY".to_string(),
            ],
            notifications: true,
        }
    }
}

/// Partial update for [`UserSettings`]; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub language: Option<Language>,
    pub theme: Option<Theme>,
    pub risk_tolerance: Option<f64>,
    pub default_pairs: Option<Vec<String>>,
    pub notifications: Option<bool>,
}

impl UserSettings {
    /// Shallow merge. Risk tolerance is clamped to [0, 1]; NaN is ignored.
    pub fn merged(&self, patch: SettingsPatch) -> Self {
        let mut next = self.clone();
        if let Some(language) = patch.language {
            next.language = language;
        }
        if let Some(theme) = patch.theme {
            next.theme = theme;
        }
        if let Some(risk) = patch.risk_tolerance
            && !risk.is_nan()
        {
            next.risk_tolerance = risk.clamp(0.0, 1.0);
        }
        if let Some(pairs) = patch.default_pairs {
            next.default_pairs = pairs;
        }
        if let Some(notifications) = patch.notifications {
            next.notifications = notifications;
        }
        next
    }
}
