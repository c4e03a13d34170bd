//! Rank tiers derived from the cumulative souls total.

/// Named tier for a finished run. Thresholds are inclusive lower bounds,
/// evaluated highest first; the tiers are disjoint by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Beginner,
    Apprentice,
    Warrior,
    Expert,
    Master,
}

impl Rank {
    pub const MASTER_AT: u32 = 2000;
    pub const EXPERT_AT: u32 = 1500;
    pub const WARRIOR_AT: u32 = 1000;
    pub const APPRENTICE_AT: u32 = 500;

    #[must_use]
    pub fn for_souls(total_souls: u32) -> Self {
        if total_souls >= Self::MASTER_AT {
            Rank::Master
        } else if total_souls >= Self::EXPERT_AT {
            Rank::Expert
        } else if total_souls >= Self::WARRIOR_AT {
            Rank::Warrior
        } else if total_souls >= Self::APPRENTICE_AT {
            Rank::Apprentice
        } else {
            Rank::Beginner
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Rank::Master => "Finance Master",
            Rank::Expert => "Financial Expert",
            Rank::Warrior => "Souls Warrior",
            Rank::Apprentice => "Brave Apprentice",
            Rank::Beginner => "Bold Beginner",
        }
    }

    /// CSS hook the views use to color the rank title.
    #[must_use]
    pub fn emphasis_class(self) -> &'static str {
        match self {
            Rank::Master => "rank-master",
            Rank::Expert => "rank-expert",
            Rank::Warrior => "rank-warrior",
            Rank::Apprentice => "rank-apprentice",
            Rank::Beginner => "rank-beginner",
        }
    }
}
