// -----------------------------------------------------------------------------
// Stats exposed to the UI
// -----------------------------------------------------------------------------

use super::TOTAL_ITERATIONS;

#[derive(Clone, Copy, Debug)]
pub struct ChaosStats {
    /// Sub-steps committed so far (each one plotted a pixel).
    pub points_plotted: u64,

    /// Iteration budget still to run; 0 means the image has settled.
    pub remaining_iterations: u64,

    /// Batches committed; mirrors the generation counter the UI keys
    /// texture uploads on.
    pub batches: u64,
}

impl Default for ChaosStats {
    fn default() -> Self {
        Self {
            points_plotted: 0,
            remaining_iterations: TOTAL_ITERATIONS,
            batches: 0,
        }
    }
}

impl ChaosStats {
    /// Progress through the iteration budget, `0.0..=100.0`.
    pub fn progress_percent(&self) -> f32 {
        let done = TOTAL_ITERATIONS - self.remaining_iterations;
        (done as f64 / TOTAL_ITERATIONS as f64 * 100.0) as f32
    }
}
