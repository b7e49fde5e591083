//! Scan matching result types.

use crate::core::Pose2D;

/// Result of a scan-to-map matching operation.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanMatchResult {
    /// The refined pose after matching.
    pub pose: Pose2D,
    /// Score of the winning candidate, distance penalty included.
    /// Higher is better alignment.
    pub score: f32,
    /// Quality classification of the match.
    pub quality: MatchQuality,
    /// Number of candidate poses scored.
    pub candidates_evaluated: usize,
    /// Number of rotations searched.
    pub num_scans: usize,
}

impl ScanMatchResult {
    /// Create a new match result.
    pub fn new(pose: Pose2D, score: f32, candidates_evaluated: usize, num_scans: usize) -> Self {
        Self {
            pose,
            score,
            quality: MatchQuality::from_score(score),
            candidates_evaluated,
            num_scans,
        }
    }

    /// Whether the match is good enough to correct the pose with.
    pub fn is_acceptable(&self) -> bool {
        self.quality.is_acceptable()
    }
}

/// Quality classification of a scan match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchQuality {
    /// Excellent match (score > 0.8).
    Excellent,
    /// Good match (score > 0.6).
    Good,
    /// Marginal match (score > 0.4).
    Marginal,
    /// Poor match (score > 0.2).
    Poor,
    /// Match failed (score <= 0.2).
    Failed,
}

impl MatchQuality {
    /// Classify a match score.
    pub fn from_score(score: f32) -> Self {
        if score > 0.8 {
            MatchQuality::Excellent
        } else if score > 0.6 {
            MatchQuality::Good
        } else if score > 0.4 {
            MatchQuality::Marginal
        } else if score > 0.2 {
            MatchQuality::Poor
        } else {
            MatchQuality::Failed
        }
    }

    /// Check if this quality is acceptable for pose correction.
    pub fn is_acceptable(&self) -> bool {
        matches!(
            self,
            MatchQuality::Excellent | MatchQuality::Good | MatchQuality::Marginal
        )
    }
}

impl std::fmt::Display for MatchQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MatchQuality::Excellent => "excellent",
            MatchQuality::Good => "good",
            MatchQuality::Marginal => "marginal",
            MatchQuality::Poor => "poor",
            MatchQuality::Failed => "failed",
        };
        f.write_str(name)
    }
}
