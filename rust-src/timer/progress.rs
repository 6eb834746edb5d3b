//! Progress ring geometry.

use std::f64::consts::PI;

use crate::config::RING_RADIUS;


/// Stroke dash values for the circular progress indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressRing {
    pub circumference: f64,
    pub dash_offset: f64,
    pub elapsed: f64,
}


impl ProgressRing {
    pub fn new(remaining_secs: u32, total_secs: u32) -> Self {
        let circumference = 2.0 * PI * RING_RADIUS;
        let elapsed = elapsed_fraction(remaining_secs, total_secs);

        Self {
            circumference,
            dash_offset: circumference * (1.0 - elapsed),
            elapsed,
        }
    }
}


/// Fraction of the run already elapsed, in `0.0..=1.0`.
pub fn elapsed_fraction(remaining_secs: u32, total_secs: u32) -> f64 {
    if total_secs == 0 {
        return 0.0;
    }
    let remaining = remaining_secs.min(total_secs);
    (total_secs - remaining) as f64 / total_secs as f64
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_ring_at_start() {
        let ring = ProgressRing::new(1500, 1500);
        assert_eq!(ring.elapsed, 0.0);
        assert!((ring.dash_offset - ring.circumference).abs() < 1e-9);
    }

    #[test]
    fn test_offset_proportional_to_elapsed() {
        let ring = ProgressRing::new(375, 1500);
        assert!((ring.elapsed - 0.75).abs() < 1e-9);
        assert!((ring.dash_offset - ring.circumference * 0.25).abs() < 1e-9);

        let done = ProgressRing::new(0, 1500);
        assert!(done.dash_offset.abs() < 1e-9);
    }

    #[test]
    fn test_zero_total_is_safe() {
        assert_eq!(elapsed_fraction(0, 0), 0.0);
        assert_eq!(elapsed_fraction(10, 5), 0.0);
    }
}
