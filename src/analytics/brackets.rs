//! Dataset-relative size brackets over sale areas.
//!
//! Two tertile cut points split a request's qualifying areas into three
//! roughly equal-count groups. Thresholds are recomputed per request — they
//! describe that request's result set, never a global scale.

use crate::models::SizeBreakdown;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three dataset-relative size classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeBracket {
    Small,
    Medium,
    Large,
}

impl SizeBracket {
    pub const ALL: [SizeBracket; 3] = [SizeBracket::Small, SizeBracket::Medium, SizeBracket::Large];
}

impl fmt::Display for SizeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeBracket::Small => write!(f, "Small"),
            SizeBracket::Medium => write!(f, "Medium"),
            SizeBracket::Large => write!(f, "Large"),
        }
    }
}

/// The two cut points of a tertile partition.
///
/// A sale is Small if `area <= small_max`, Large if `area > medium_max`,
/// Medium otherwise. Groups are approximately equal in count; ties spanning
/// a boundary land in the lower bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBracketThresholds {
    pub small_max: Decimal,
    pub medium_max: Decimal,
}

impl SizeBracketThresholds {
    /// Compute thresholds from a request's qualifying areas.
    ///
    /// Callers filter out non-positive/undefined areas first. The cut points
    /// are the last elements of the bottom and middle tertiles of the sorted
    /// areas, so the top tertile is exactly the top third when the count
    /// divides evenly. Returns `None` on empty input; any non-empty input
    /// produces valid (possibly degenerate) thresholds.
    pub fn from_areas(areas: &[Decimal]) -> Option<Self> {
        if areas.is_empty() {
            return None;
        }

        let mut sorted = areas.to_vec();
        sorted.sort();
        let n = sorted.len();

        // ceil(n/3) elements per tertile; clamp keeps tiny inputs in range.
        let small_idx = (n.div_ceil(3) - 1).min(n - 1);
        let medium_idx = ((2 * n).div_ceil(3) - 1).min(n - 1);

        Some(Self {
            small_max: sorted[small_idx],
            medium_max: sorted[medium_idx],
        })
    }

    /// Bracket for a single area.
    pub fn classify(&self, area: Decimal) -> SizeBracket {
        if area <= self.small_max {
            SizeBracket::Small
        } else if area <= self.medium_max {
            SizeBracket::Medium
        } else {
            SizeBracket::Large
        }
    }

    /// Display range label for one bracket.
    pub fn range_label(&self, bracket: SizeBracket) -> String {
        match bracket {
            SizeBracket::Small => format!("Area 0 – {:.2}", self.small_max),
            SizeBracket::Medium => {
                format!("Area {:.2} – {:.2}", self.small_max, self.medium_max)
            }
            SizeBracket::Large => format!("Area over {:.2}", self.medium_max),
        }
    }

    /// The threshold values and range labels attached to responses.
    pub fn breakdown(&self) -> SizeBreakdown {
        SizeBreakdown {
            small_max: self.small_max,
            medium_max: self.medium_max,
            small_range: self.range_label(SizeBracket::Small),
            medium_range: self.range_label(SizeBracket::Medium),
            large_range: self.range_label(SizeBracket::Large),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn areas(values: &[i64]) -> Vec<Decimal> {
        values.iter().map(|v| Decimal::from(*v)).collect()
    }

    #[test]
    fn empty_input_has_no_thresholds() {
        assert!(SizeBracketThresholds::from_areas(&[]).is_none());
    }

    #[test]
    fn divisible_count_partitions_into_exact_thirds() {
        let input = areas(&[10, 20, 30, 40, 50, 60, 70, 80, 90]);
        let t = SizeBracketThresholds::from_areas(&input).unwrap();

        assert_eq!(t.small_max, dec!(30));
        assert_eq!(t.medium_max, dec!(60));

        let large: Vec<Decimal> = input
            .iter()
            .copied()
            .filter(|a| t.classify(*a) == SizeBracket::Large)
            .collect();
        assert_eq!(large, areas(&[70, 80, 90]));
    }

    #[test]
    fn every_small_area_is_at_most_small_max() {
        let input = areas(&[5, 1, 9, 3, 7, 2, 8, 4, 6, 10]);
        let t = SizeBracketThresholds::from_areas(&input).unwrap();
        for a in &input {
            if t.classify(*a) == SizeBracket::Small {
                assert!(*a <= t.small_max);
            }
        }
    }

    #[test]
    fn ties_spanning_a_boundary_stay_in_the_lower_bracket() {
        let input = areas(&[100, 100, 2500]);
        let t = SizeBracketThresholds::from_areas(&input).unwrap();
        assert_eq!(t.classify(dec!(100)), SizeBracket::Small);
        assert_eq!(t.classify(dec!(2500)), SizeBracket::Large);
    }

    #[test]
    fn single_area_classifies_everything_small() {
        let t = SizeBracketThresholds::from_areas(&areas(&[42])).unwrap();
        assert_eq!(t.small_max, dec!(42));
        assert_eq!(t.medium_max, dec!(42));
        assert_eq!(t.classify(dec!(42)), SizeBracket::Small);
        assert_eq!(t.classify(dec!(43)), SizeBracket::Large);
    }

    #[test]
    fn two_areas_split_small_and_medium() {
        let t = SizeBracketThresholds::from_areas(&areas(&[10, 20])).unwrap();
        assert_eq!(t.classify(dec!(10)), SizeBracket::Small);
        assert_eq!(t.classify(dec!(20)), SizeBracket::Medium);
    }

    #[test]
    fn result_depends_only_on_the_multiset() {
        let a = areas(&[3, 1, 2]);
        let b = areas(&[2, 3, 1]);
        assert_eq!(
            SizeBracketThresholds::from_areas(&a),
            SizeBracketThresholds::from_areas(&b)
        );
    }

    #[test]
    fn range_labels_use_two_decimals() {
        let t = SizeBracketThresholds::from_areas(&areas(&[100, 200, 300])).unwrap();
        assert_eq!(t.range_label(SizeBracket::Small), "Area 0 – 100.00");
        assert_eq!(t.range_label(SizeBracket::Medium), "Area 100.00 – 200.00");
        assert_eq!(t.range_label(SizeBracket::Large), "Area over 200.00");
    }
}
