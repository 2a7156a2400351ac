//! Result and scope types for quota aggregation.

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Target, achievement, and shortfall for one user-or-group and period.
/// The deficit is clamped at zero by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterPerformance {
    pub adjusted_target: Decimal,
    pub achieved: Decimal,
    pub deficit: Decimal,
}

impl QuarterPerformance {
    pub fn zeroed() -> Self {
        QuarterPerformance {
            adjusted_target: Decimal::ZERO,
            achieved: Decimal::ZERO,
            deficit: Decimal::ZERO,
        }
    }

    /// Achieved as a percentage of the adjusted target, rounded and capped at
    /// 100. A zero target reads as 0 regardless of achievement.
    pub fn achievement_percentage(&self) -> u32 {
        if self.adjusted_target <= Decimal::ZERO {
            return 0;
        }
        (self.achieved / self.adjusted_target * dec!(100))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .min(dec!(100))
            .to_u32()
            .unwrap_or(0)
    }

    /// Element-wise sum used for group rollups.
    pub fn combine(&mut self, other: &QuarterPerformance) {
        self.adjusted_target += other.adjusted_target;
        self.achieved += other.achieved;
        self.deficit += other.deficit;
    }
}

/// Dashboard scope requested by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewScope {
    Team,
    MyLeadsOnly,
}

/// Drill-down selection within a team view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamSelection {
    All,
    User(String),
}

impl TeamSelection {
    /// The UI sends "all" (or nothing) for the whole team, otherwise a uid.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None => TeamSelection::All,
            Some(v) if v.eq_ignore_ascii_case("all") || v.trim().is_empty() => TeamSelection::All,
            Some(uid) => TeamSelection::User(uid.to_string()),
        }
    }
}
