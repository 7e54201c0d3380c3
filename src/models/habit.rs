use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Rejected before anything reaches the period core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseFieldError {
    #[error("Unknown cadence '{0}'. Use: daily, weekly")]
    Cadence(String),
    #[error("Unknown strategy '{0}'. Use: strict, flexible")]
    Strategy(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Daily,
    Weekly,
}

impl Cadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Cadence::Daily => "Daily",
            Cadence::Weekly => "Weekly",
        }
    }

    /// Days between consecutive anchors for this cadence.
    pub fn step_days(&self) -> i64 {
        match self {
            Cadence::Daily => 1,
            Cadence::Weekly => 7,
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Cadence {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "d" => Ok(Cadence::Daily),
            "weekly" | "w" => Ok(Cadence::Weekly),
            _ => Err(ParseFieldError::Cadence(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Strict,
    Flexible,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Strict => "strict",
            Strategy::Flexible => "flexible",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Strategy::Strict => "Strict",
            Strategy::Flexible => "Flexible",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Strategy {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" | "s" => Ok(Strategy::Strict),
            "flexible" | "f" => Ok(Strategy::Flexible),
            _ => Err(ParseFieldError::Strategy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    pub cadence: Cadence,
    pub strategy: Strategy,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_parses_full_and_short_forms() {
        assert_eq!("daily".parse::<Cadence>().unwrap(), Cadence::Daily);
        assert_eq!("W".parse::<Cadence>().unwrap(), Cadence::Weekly);
        assert!("monthly".parse::<Cadence>().is_err());
    }

    #[test]
    fn strategy_rejects_unknown_values() {
        assert_eq!("strict".parse::<Strategy>().unwrap(), Strategy::Strict);
        assert_eq!("f".parse::<Strategy>().unwrap(), Strategy::Flexible);
        let err = "lenient".parse::<Strategy>().unwrap_err();
        assert_eq!(err, ParseFieldError::Strategy("lenient".to_string()));
    }

    #[test]
    fn step_days_matches_cadence() {
        assert_eq!(Cadence::Daily.step_days(), 1);
        assert_eq!(Cadence::Weekly.step_days(), 7);
    }
}
