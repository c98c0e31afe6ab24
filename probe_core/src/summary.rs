//! Per-axis median summarization of a sample series.
//!
//! Exactly three independent medians — no windowing, filtering, outlier
//! rejection, or resampling.

use crate::error::ProbeError;
use crate::series::SampleSeries;
use serde::{Deserialize, Serialize};

/// Median position of one run, per axis (millimeters).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionMedians {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Standard median: middle element for odd length, average of the two
/// middle elements for even length. Empty input is an error, never NaN.
pub fn median(values: &[f64]) -> Result<f64, ProbeError> {
    if values.is_empty() {
        return Err(ProbeError::EmptySeries);
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Compute the three per-axis medians of `series`.
pub fn summarize(series: &SampleSeries) -> Result<PositionMedians, ProbeError> {
    Ok(PositionMedians {
        x: median(series.xs())?,
        y: median(series.ys())?,
        z: median(series.zs())?,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;
    use approx::assert_abs_diff_eq;

    #[test]
    fn median_odd_length() {
        assert_abs_diff_eq!(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
    }

    #[test]
    fn median_even_length_averages_middle_pair() {
        assert_abs_diff_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
    }

    #[test]
    fn median_of_empty_is_an_error() {
        assert!(matches!(median(&[]), Err(ProbeError::EmptySeries)));
    }

    #[test]
    fn axes_summarized_independently() {
        let mut series = SampleSeries::new();
        series.push(Position::new(0.0, 10.0, -1.0));
        series.push(Position::new(2.0, 30.0, -3.0));
        series.push(Position::new(1.0, 20.0, -2.0));
        let m = summarize(&series).unwrap();
        assert_abs_diff_eq!(m.x, 1.0);
        assert_abs_diff_eq!(m.y, 20.0);
        assert_abs_diff_eq!(m.z, -2.0);
    }
}
