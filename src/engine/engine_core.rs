//! Engine core — the chaos-game generator.
//!
//! Responsibilities:
//! - Owns the current point, the three attractor vertices, the remaining
//!   iteration budget, and the pixel canvas.
//! - Advances the walk in fixed batches, one batch per displayed frame,
//!   plotting each visited point in red.
//! - Hands the UI byte-exact canvas snapshots keyed by a generation counter.
//!
//! Key invariants:
//! - `current_point` stays inside `[0, CANVAS_DIM)²`: the attractors lie in
//!   that range and the truncating midpoint of two in-range points is again
//!   in range, so every canvas write is in-bounds.
//! - `remaining_iterations` is non-increasing and never wraps below zero.
//! - Once the budget hits zero the engine is settled: `step_batch` becomes
//!   a no-op until `reset`.

use log::info;

use super::{Canvas, ChaosStats, PcgSource, Pixel, Point, RandomSource};

/// Number of attractor vertices.
pub(crate) const ATTRACTOR_COUNT: usize = 3;

/// Triangle the walk is pulled toward. With the midpoint rule this
/// converges to the Sierpinski pattern.
const ATTRACTORS: [Point; ATTRACTOR_COUNT] = [
    Point::new(0, 799),
    Point::new(799, 799),
    Point::new(400, 0),
];

/// Total sub-step budget for one run.
pub(crate) const TOTAL_ITERATIONS: u64 = 100_000_000;

/// Sub-steps committed per `step_batch` call. Pacing only: one batch per
/// frame keeps the fractal visibly animating instead of appearing at once.
const STEPS_PER_BATCH: u64 = 100;

// -----------------------------------------------------------------------------
// Public engine API (used by UI)
// -----------------------------------------------------------------------------
pub struct ChaosEngine<R: RandomSource = PcgSource> {
    rng: R,
    attractors: [Point; ATTRACTOR_COUNT],
    current_point: Point,
    remaining_iterations: u64,
    canvas: Canvas,
    generation_counter: u64,
    stats: ChaosStats,
}

impl ChaosEngine<PcgSource> {
    /// Deterministic engine; identical seeds produce byte-identical
    /// canvases for the same number of batches.
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(PcgSource::seeded(seed))
    }

    /// Engine seeded from OS entropy, for normal runs.
    pub fn from_entropy() -> Self {
        Self::with_source(PcgSource::from_entropy())
    }
}

impl<R: RandomSource> ChaosEngine<R> {
    /// Create the engine: draw a uniform start point from the source,
    /// allocate the all-black canvas, and arm the full iteration budget.
    pub fn with_source(mut rng: R) -> Self {
        let start = Point::new(rng.start_coordinate(), rng.start_coordinate());
        Self {
            rng,
            attractors: ATTRACTORS,
            current_point: start,
            remaining_iterations: TOTAL_ITERATIONS,
            canvas: Canvas::new(),
            generation_counter: 0,
            stats: ChaosStats::default(),
        }
    }

    /// Redraw the start point from the same source, clear the canvas, and
    /// restore the full budget. The generation counter drops to 0 so the UI
    /// re-uploads the blank canvas on its next frame.
    pub fn reset(&mut self) {
        self.current_point = Point::new(self.rng.start_coordinate(), self.rng.start_coordinate());
        self.remaining_iterations = TOTAL_ITERATIONS;
        self.canvas.clear();
        self.generation_counter = 0;
        self.stats = ChaosStats::default();
        info!("chaos walk restarted from {:?}", self.current_point);
    }

    /// Advance one batch: `STEPS_PER_BATCH` sub-steps, or however many the
    /// budget still allows. No-op once settled.
    pub fn step_batch(&mut self) {
        if self.remaining_iterations == 0 {
            return;
        }
        let steps = STEPS_PER_BATCH.min(self.remaining_iterations);
        self.advance(steps);
        if self.remaining_iterations == 0 {
            info!(
                "chaos walk settled after {} points",
                self.stats.points_plotted
            );
        }
    }

    /// Commit `steps` sub-steps: jump halfway toward a random vertex and
    /// plot the landing pixel. Caller keeps `steps <= remaining_iterations`.
    fn advance(&mut self, steps: u64) {
        for _ in 0..steps {
            let vertex = self.attractors[self.rng.vertex_index()];
            self.current_point = vertex.midpoint(self.current_point);
            self.canvas.put(self.current_point, Pixel::RED);
        }
        self.remaining_iterations -= steps;
        self.generation_counter = self.generation_counter.saturating_add(1);
        self.stats.points_plotted += steps;
        self.stats.remaining_iterations = self.remaining_iterations;
        self.stats.batches = self.generation_counter;
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------
    pub fn is_settled(&self) -> bool {
        self.remaining_iterations == 0
    }

    pub fn current_point(&self) -> Point {
        self.current_point
    }

    pub fn remaining_iterations(&self) -> u64 {
        self.remaining_iterations
    }

    /// Copy of the canvas for UI upload: RGB bytes, width, height, and the
    /// generation counter the UI dedups uploads on.
    pub fn capture_snapshot(&self) -> (Vec<u8>, usize, usize, u64) {
        (
            self.canvas.as_rgb_bytes().to_vec(),
            super::CANVAS_DIM,
            super::CANVAS_DIM,
            self.generation_counter,
        )
    }

    /// Copy of current stats for the HUD.
    pub fn capture_stats_snapshot(&self) -> ChaosStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CANVAS_DIM;
    use std::collections::VecDeque;

    /// Replays a scripted walk: fixed start coordinates, fixed vertex picks.
    struct ScriptedSource {
        coordinates: VecDeque<i32>,
        picks: VecDeque<usize>,
    }

    impl ScriptedSource {
        fn new(coordinates: &[i32], picks: &[usize]) -> Self {
            Self {
                coordinates: coordinates.iter().copied().collect(),
                picks: picks.iter().copied().collect(),
            }
        }
    }

    impl RandomSource for ScriptedSource {
        fn start_coordinate(&mut self) -> i32 {
            self.coordinates.pop_front().expect("script ran out of coordinates")
        }

        fn vertex_index(&mut self) -> usize {
            self.picks.pop_front().expect("script ran out of picks")
        }
    }

    fn count_non_black(bytes: &[u8]) -> usize {
        bytes
            .chunks_exact(3)
            .filter(|px| px[0] != 0 || px[1] != 0 || px[2] != 0)
            .count()
    }

    #[test]
    fn attractors_lie_inside_the_canvas() {
        for v in ATTRACTORS {
            assert!((0..CANVAS_DIM as i32).contains(&v.x));
            assert!((0..CANVAS_DIM as i32).contains(&v.y));
        }
    }

    #[test]
    fn scripted_walk_visits_the_expected_points() {
        let source = ScriptedSource::new(&[400, 400], &[0, 1, 2]);
        let mut engine = ChaosEngine::with_source(source);
        assert_eq!(engine.current_point(), Point::new(400, 400));

        engine.advance(1);
        assert_eq!(engine.current_point(), Point::new(200, 599));
        engine.advance(1);
        assert_eq!(engine.current_point(), Point::new(499, 699));
        engine.advance(1);
        assert_eq!(engine.current_point(), Point::new(449, 349));

        // Exactly the three visited pixels are red, everything else black.
        for (x, y) in [(200usize, 599usize), (499, 699), (449, 349)] {
            assert_eq!(engine.canvas.get(x, y), Pixel::RED);
        }
        let (bytes, _, _, _) = engine.capture_snapshot();
        assert_eq!(count_non_black(&bytes), 3);
    }

    #[test]
    fn same_seed_produces_byte_identical_canvases() {
        let mut a = ChaosEngine::seeded(42);
        let mut b = ChaosEngine::seeded(42);
        for _ in 0..500 {
            a.step_batch();
            b.step_batch();
        }
        assert_eq!(a.current_point(), b.current_point());
        assert_eq!(a.capture_snapshot().0, b.capture_snapshot().0);
    }

    #[test]
    fn current_point_stays_in_bounds() {
        let mut engine = ChaosEngine::seeded(7);
        let range = 0..CANVAS_DIM as i32;
        assert!(range.contains(&engine.current_point().x));
        assert!(range.contains(&engine.current_point().y));
        for _ in 0..1_000 {
            engine.step_batch();
            let p = engine.current_point();
            assert!(range.contains(&p.x) && range.contains(&p.y));
        }
    }

    #[test]
    fn budget_is_monotonic_and_batches_are_bounded() {
        let mut engine = ChaosEngine::seeded(3);
        let mut previous = engine.remaining_iterations();
        for _ in 0..100 {
            engine.step_batch();
            let now = engine.remaining_iterations();
            assert!(now <= previous);
            assert_eq!(previous - now, STEPS_PER_BATCH);
            previous = now;
        }
    }

    #[test]
    fn one_batch_lights_at_most_batch_size_new_pixels() {
        let mut engine = ChaosEngine::seeded(11);
        let before = count_non_black(&engine.capture_snapshot().0);
        engine.step_batch();
        let after = count_non_black(&engine.capture_snapshot().0);
        assert!(after >= before);
        assert!(after - before <= STEPS_PER_BATCH as usize);
    }

    #[test]
    fn settled_engine_is_idempotent() {
        let mut engine = ChaosEngine::seeded(5);
        // Shrink the budget so the run settles within a few batches.
        engine.remaining_iterations = 250;

        engine.step_batch();
        engine.step_batch();
        assert_eq!(engine.remaining_iterations(), 50);
        engine.step_batch(); // short final batch, must not go negative
        assert!(engine.is_settled());

        let point = engine.current_point();
        let (bytes, _, _, generation) = engine.capture_snapshot();
        engine.step_batch();
        engine.step_batch();
        assert_eq!(engine.current_point(), point);
        assert_eq!(engine.remaining_iterations(), 0);
        let (bytes_after, _, _, generation_after) = engine.capture_snapshot();
        assert_eq!(bytes, bytes_after);
        assert_eq!(generation, generation_after);
    }

    #[test]
    fn reset_rearms_the_budget_and_clears_the_canvas() {
        let source = ScriptedSource::new(&[400, 400, 10, 20], &[0, 1, 2]);
        let mut engine = ChaosEngine::with_source(source);
        engine.advance(3);
        assert!(count_non_black(&engine.capture_snapshot().0) > 0);

        engine.reset();
        assert_eq!(engine.current_point(), Point::new(10, 20));
        assert_eq!(engine.remaining_iterations(), TOTAL_ITERATIONS);
        let (bytes, _, _, generation) = engine.capture_snapshot();
        assert_eq!(count_non_black(&bytes), 0);
        assert_eq!(generation, 0);
    }

    #[test]
    fn stats_track_the_walk() {
        let mut engine = ChaosEngine::seeded(9);
        engine.step_batch();
        engine.step_batch();
        let stats = engine.capture_stats_snapshot();
        assert_eq!(stats.points_plotted, 2 * STEPS_PER_BATCH);
        assert_eq!(stats.batches, 2);
        assert_eq!(
            stats.remaining_iterations,
            TOTAL_ITERATIONS - 2 * STEPS_PER_BATCH
        );
        assert!(stats.progress_percent() > 0.0);
    }
}
