//! Runtime system trait

use glide_core::Result;

/// A system that can be ticked by the game loop
///
/// Systems are updated in registration order, once per frame, with the
/// elapsed time supplied by the driver. Systems never read the wall clock.
pub trait RuntimeSystem {
    /// Called once before the first update
    fn initialize(&mut self) -> Result<()>;

    /// Called once per frame with the elapsed time in seconds
    fn update(&mut self, dt: f64) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
