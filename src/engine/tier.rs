//! Mastery tier lookup: maps a rating to a display tier and color.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryTier {
    pub name: &'static str,
    /// Lowest score that still lands in this tier.
    pub floor: f64,
    pub color: &'static str,
}

const TIERS: [MasteryTier; 6] = [
    MasteryTier {
        name: "Seedling",
        floor: 0.0,
        color: "#8bc34a",
    },
    MasteryTier {
        name: "Apprentice",
        floor: 800.0,
        color: "#03a9f4",
    },
    MasteryTier {
        name: "Scholar",
        floor: 1000.0,
        color: "#3f51b5",
    },
    MasteryTier {
        name: "Expert",
        floor: 1200.0,
        color: "#9c27b0",
    },
    MasteryTier {
        name: "Master",
        floor: 1500.0,
        color: "#ff9800",
    },
    MasteryTier {
        name: "Grandmaster",
        floor: 1800.0,
        color: "#f44336",
    },
];

/// Pure lookup; scores below the first floor (unclamped ratings can go
/// negative) stay in the bottom tier.
pub fn tier_for(score: f64) -> &'static MasteryTier {
    TIERS
        .iter()
        .rev()
        .find(|t| score >= t.floor)
        .unwrap_or(&TIERS[0])
}

pub fn all_tiers() -> &'static [MasteryTier] {
    &TIERS
}
