//! Filter module deciding which probed files enter the manifest.
//!
//! Files below either the size or the duration threshold are dropped.
//! This is a policy outcome, not an error; dropped files are simply
//! omitted from the manifest.

use crate::probe::MediaMetrics;
use serde::{Deserialize, Serialize};

/// Minimum size and duration a file must reach to be listed.
///
/// A threshold of 0 disables that particular check, since metrics are
/// never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterThresholds {
    /// Minimum file size in MB.
    pub min_size_mb: u64,
    /// Minimum duration in seconds.
    pub min_duration_secs: u64,
}

/// Result of the threshold check for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterDecision {
    /// File meets both thresholds and enters the manifest.
    Keep,
    /// File fails at least one threshold and is omitted.
    Drop {
        size_mb: u64,
        duration_secs: u64,
    },
}

/// Check a file's metrics against the configured thresholds.
///
/// Returns `Drop` if `size_mb < min_size_mb` or
/// `duration_secs < min_duration_secs`; failing either threshold drops
/// the file even when the other passes.
pub fn check_thresholds(metrics: &MediaMetrics, thresholds: &FilterThresholds) -> FilterDecision {
    if metrics.size_mb < thresholds.min_size_mb
        || metrics.duration_secs < thresholds.min_duration_secs
    {
        FilterDecision::Drop {
            size_mb: metrics.size_mb,
            duration_secs: metrics.duration_secs,
        }
    } else {
        FilterDecision::Keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_small_short_file_dropped() {
        let thresholds = FilterThresholds {
            min_size_mb: 10,
            min_duration_secs: 60,
        };
        let metrics = MediaMetrics {
            size_mb: 5,
            duration_secs: 30,
        };

        assert_eq!(
            check_thresholds(&metrics, &thresholds),
            FilterDecision::Drop {
                size_mb: 5,
                duration_secs: 30
            }
        );
    }

    #[test]
    fn test_zero_thresholds_keep_everything() {
        let thresholds = FilterThresholds {
            min_size_mb: 0,
            min_duration_secs: 0,
        };
        let metrics = MediaMetrics {
            size_mb: 5,
            duration_secs: 30,
        };

        assert_eq!(check_thresholds(&metrics, &thresholds), FilterDecision::Keep);
        assert_eq!(
            check_thresholds(&MediaMetrics::ZERO, &thresholds),
            FilterDecision::Keep
        );
    }

    #[test]
    fn test_failing_one_threshold_drops() {
        let thresholds = FilterThresholds {
            min_size_mb: 10,
            min_duration_secs: 60,
        };

        // Long but too small
        let small = MediaMetrics {
            size_mb: 5,
            duration_secs: 7200,
        };
        assert!(matches!(
            check_thresholds(&small, &thresholds),
            FilterDecision::Drop { .. }
        ));

        // Large but too short
        let short = MediaMetrics {
            size_mb: 5000,
            duration_secs: 10,
        };
        assert!(matches!(
            check_thresholds(&short, &thresholds),
            FilterDecision::Drop { .. }
        ));
    }

    #[test]
    fn test_exact_thresholds_keep() {
        let thresholds = FilterThresholds {
            min_size_mb: 10,
            min_duration_secs: 60,
        };
        let metrics = MediaMetrics {
            size_mb: 10,
            duration_secs: 60,
        };

        assert_eq!(check_thresholds(&metrics, &thresholds), FilterDecision::Keep);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // Keep iff both metrics reach their thresholds.
        #[test]
        fn prop_threshold_check(
            size_mb in 0u64..100_000,
            duration_secs in 0u64..1_000_000,
            min_size_mb in 0u64..100_000,
            min_duration_secs in 0u64..1_000_000,
        ) {
            let metrics = MediaMetrics { size_mb, duration_secs };
            let thresholds = FilterThresholds { min_size_mb, min_duration_secs };

            let decision = check_thresholds(&metrics, &thresholds);
            let expected_keep = size_mb >= min_size_mb && duration_secs >= min_duration_secs;

            match decision {
                FilterDecision::Keep => prop_assert!(expected_keep),
                FilterDecision::Drop { size_mb: s, duration_secs: d } => {
                    prop_assert!(!expected_keep);
                    prop_assert_eq!(s, size_mb);
                    prop_assert_eq!(d, duration_secs);
                }
            }
        }
    }
}
