//! Glide Runtime - Tick-loop infrastructure
//!
//! Provides the building blocks for driving path animations once per frame:
//! - `GameClock`: frame delta tracking with a fixed-timestep accumulator
//! - `EventBus`: typed event queue that systems push to and consumers drain
//! - `RuntimeSystem`: trait for systems ticked by the game loop

mod clock;
mod event_bus;
mod system;

pub use clock::{GameClock, MAX_FRAME_TIME};
pub use event_bus::EventBus;
pub use system::RuntimeSystem;
