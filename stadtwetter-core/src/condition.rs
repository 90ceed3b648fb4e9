//! Condition classification.
//!
//! Brightsky reports "dry" even under a closed cloud deck; the display
//! category folds heavy cloud cover into `Cloudy`.

use crate::model::RawCondition;

/// Cloud-cover percentage at and above which a dry sky is shown as cloudy.
const CLOUDY_THRESHOLD_PCT: f64 = 75.0;

/// Map a raw condition plus cloud cover to the display category.
pub fn classify(condition: RawCondition, cloud_cover_pct: f64) -> RawCondition {
    match condition {
        RawCondition::Dry if cloud_cover_pct >= CLOUDY_THRESHOLD_PCT => RawCondition::Cloudy,
        other => other,
    }
}
