//! Session state for the cost calculator.
//!
//! Holds what must survive between user actions within one session: the
//! most recent successful calculation, which export reads from.

use plastic_core::CostBreakdown;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Last successful calculation. `None` until the user calculates once.
    last_calculation: Option<CostBreakdown>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `breakdown` as the latest result, replacing any earlier one.
    pub fn record_calculation(
        &mut self,
        breakdown: CostBreakdown,
    ) {
        self.last_calculation = Some(breakdown);
    }

    pub fn last_calculation(&self) -> Option<&CostBreakdown> {
        self.last_calculation.as_ref()
    }
}
