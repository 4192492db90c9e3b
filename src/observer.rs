//! Step observer trait for monitoring ribbon ticks.

use crate::ribbon::WrapEvent;

/// Trait for observing ribbon simulation steps.
///
/// Implement this trait to monitor the simulation (e.g., for debugging,
/// visualization, or counting recycles). All methods have default no-op
/// implementations.
pub trait StepObserver {
    /// Called after every particle has been integrated.
    fn on_integrate(&mut self) {}

    /// Called after a boundary particle has been recycled to the opposite edge.
    fn on_wrap(&mut self, _event: &WrapEvent) {}

    /// Called when a tick is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
