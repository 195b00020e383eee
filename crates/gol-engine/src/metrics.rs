//! Per-step metrics for the simulation engine.
//!
//! [`StepMetrics`] captures timing and population data for a single
//! committed transition.

/// Timing and population metrics collected during a single step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the whole step, in microseconds.
    pub total_us: u64,
    /// Time spent evaluating the rule over the active region, in microseconds.
    pub evaluate_us: u64,
    /// Number of interior cells evaluated.
    pub scanned_cells: usize,
    /// Cells born this step.
    pub births: usize,
    /// Cells that died this step.
    pub deaths: usize,
    /// Population after the step.
    pub population: usize,
}
