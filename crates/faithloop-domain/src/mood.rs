//! Mood module - the categorical mood attached to every check-in

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mood recorded with a check-in
///
/// Each mood carries an integer weight used for weekly averaging:
/// great=5, good=4, neutral=3, bad=2, terrible=1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Peaceful, grateful day
    Great,

    /// A good day
    Good,

    /// Ordinary day
    Neutral,

    /// Busy or discouraged day
    Bad,

    /// A hard day
    Terrible,
}

impl Mood {
    /// All moods, highest weight first
    pub const ALL: [Mood; 5] = [
        Mood::Great,
        Mood::Good,
        Mood::Neutral,
        Mood::Bad,
        Mood::Terrible,
    ];

    /// Get the mood name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Great => "great",
            Mood::Good => "good",
            Mood::Neutral => "neutral",
            Mood::Bad => "bad",
            Mood::Terrible => "terrible",
        }
    }

    /// Parse a mood from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "great" => Some(Mood::Great),
            "good" => Some(Mood::Good),
            "neutral" => Some(Mood::Neutral),
            "bad" => Some(Mood::Bad),
            "terrible" => Some(Mood::Terrible),
            _ => None,
        }
    }

    /// Integer weight used for averaging
    pub fn weight(&self) -> u32 {
        match self {
            Mood::Great => 5,
            Mood::Good => 4,
            Mood::Neutral => 3,
            Mood::Bad => 2,
            Mood::Terrible => 1,
        }
    }

    /// Map an average score back to a mood bucket
    ///
    /// Thresholds are inclusive lower bounds: ≥4.5 great, ≥3.5 good,
    /// ≥2.5 neutral, ≥1.5 bad, anything lower terrible.
    pub fn from_score(score: f64) -> Self {
        if score >= 4.5 {
            Mood::Great
        } else if score >= 3.5 {
            Mood::Good
        } else if score >= 2.5 {
            Mood::Neutral
        } else if score >= 1.5 {
            Mood::Bad
        } else {
            Mood::Terrible
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Neutral
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid mood: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_descend() {
        let weights: Vec<u32> = Mood::ALL.iter().map(|m| m.weight()).collect();
        assert_eq!(weights, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_from_score_boundaries_inclusive() {
        assert_eq!(Mood::from_score(4.5), Mood::Great);
        assert_eq!(Mood::from_score(4.49), Mood::Good);
        assert_eq!(Mood::from_score(3.5), Mood::Good);
        assert_eq!(Mood::from_score(2.5), Mood::Neutral);
        assert_eq!(Mood::from_score(1.5), Mood::Bad);
        assert_eq!(Mood::from_score(1.0), Mood::Terrible);
    }

    #[test]
    fn test_parse_round_trip() {
        for mood in Mood::ALL {
            assert_eq!(Mood::parse(mood.as_str()), Some(mood));
        }
        assert_eq!(Mood::parse("GREAT"), Some(Mood::Great));
        assert!("ecstatic".parse::<Mood>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Mood::Terrible).unwrap();
        assert_eq!(json, "\"terrible\"");
    }
}
