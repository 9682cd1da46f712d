use super::Profile;

/// Percentage deviation of `actual` from `expected`.
pub fn calculate_area_drift(expected: f64, actual: f64) -> f64 {
    (actual - expected).abs() / expected * 100.0
}

/// Percentage area change between each pair of adjacent cross-sections.
pub fn adjacent_area_drifts(profile: &Profile) -> Vec<f64> {
    profile
        .areas()
        .windows(2)
        .map(|pair| calculate_area_drift(pair[0], pair[1]))
        .collect()
}
