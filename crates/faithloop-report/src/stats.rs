//! Deterministic report statistics

use faithloop_domain::{Entry, Extraction, Mood};
use serde::{Deserialize, Serialize};

/// Per-mood check-in counts, all five moods always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodDistribution {
    /// Count of `great`
    pub great: usize,
    /// Count of `good`
    pub good: usize,
    /// Count of `neutral`
    pub neutral: usize,
    /// Count of `bad`
    pub bad: usize,
    /// Count of `terrible`
    pub terrible: usize,
}

impl MoodDistribution {
    /// Count moods over `entries`
    pub fn from_entries(entries: &[Entry]) -> Self {
        entries.iter().fold(Self::default(), |mut dist, entry| {
            dist.record(entry.mood);
            dist
        })
    }

    /// Count one more occurrence of `mood`
    pub fn record(&mut self, mood: Mood) {
        match mood {
            Mood::Great => self.great += 1,
            Mood::Good => self.good += 1,
            Mood::Neutral => self.neutral += 1,
            Mood::Bad => self.bad += 1,
            Mood::Terrible => self.terrible += 1,
        }
    }

    /// Count for `mood`
    pub fn count(&self, mood: Mood) -> usize {
        match mood {
            Mood::Great => self.great,
            Mood::Good => self.good,
            Mood::Neutral => self.neutral,
            Mood::Bad => self.bad,
            Mood::Terrible => self.terrible,
        }
    }

    /// Total number of counted entries
    pub fn total(&self) -> usize {
        Mood::ALL.iter().map(|m| self.count(*m)).sum()
    }

    /// Weighted average mood; `None` when nothing was counted
    pub fn analysis(&self) -> Option<MoodAnalysis> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: usize = Mood::ALL
            .iter()
            .map(|m| self.count(*m) * m.weight() as usize)
            .sum();
        let score = weighted as f64 / total as f64;

        Some(MoodAnalysis {
            average: Mood::from_score(score),
            average_score: round2(score),
        })
    }
}

/// Average mood over a reporting window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodAnalysis {
    /// Bucketed average
    pub average: Mood,
    /// Numeric average, rounded to two decimals
    pub average_score: f64,
}

/// Counts attached to every report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    /// Entries in the window
    pub total_checkins: usize,
    /// Tasks across all extractions
    pub total_tasks: usize,
    /// Obstacles across all extractions
    pub total_obstacles: usize,
    /// Per-mood counts
    pub mood_distribution: MoodDistribution,
}

impl ReportStats {
    /// Compute stats for a window
    pub fn compute(entries: &[Entry], extractions: &[Extraction]) -> Self {
        Self {
            total_checkins: entries.len(),
            total_tasks: extractions.iter().map(|e| e.fields.tasks.len()).sum(),
            total_obstacles: extractions.iter().map(|e| e.fields.obstacles.len()).sum(),
            mood_distribution: MoodDistribution::from_entries(entries),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(great: usize, good: usize, neutral: usize, bad: usize, terrible: usize) -> MoodDistribution {
        MoodDistribution {
            great,
            good,
            neutral,
            bad,
            terrible,
        }
    }

    #[test]
    fn test_great_and_good_average_to_great() {
        let analysis = dist(1, 1, 0, 0, 0).analysis().unwrap();
        assert_eq!(analysis.average_score, 4.5);
        assert_eq!(analysis.average, Mood::Great);
    }

    #[test]
    fn test_empty_distribution_has_no_analysis() {
        assert!(MoodDistribution::default().analysis().is_none());
    }

    #[test]
    fn test_average_rounded_to_two_decimals() {
        // (5 + 4 + 4) / 3 = 4.333...
        let analysis = dist(1, 2, 0, 0, 0).analysis().unwrap();
        assert_eq!(analysis.average_score, 4.33);
        assert_eq!(analysis.average, Mood::Good);
    }

    #[test]
    fn test_low_scores() {
        assert_eq!(dist(0, 0, 0, 0, 3).analysis().unwrap().average, Mood::Terrible);
        assert_eq!(dist(0, 0, 0, 1, 1).analysis().unwrap().average, Mood::Bad);
    }

    #[test]
    fn test_record_and_total() {
        let mut d = MoodDistribution::default();
        for mood in Mood::ALL {
            d.record(mood);
        }
        d.record(Mood::Bad);
        assert_eq!(d.total(), 6);
        assert_eq!(d.count(Mood::Bad), 2);
    }

    #[test]
    fn test_distribution_serializes_all_moods() {
        let json = serde_json::to_value(MoodDistribution::default()).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 5);
        assert_eq!(json["terrible"], 0);
    }
}
