//! The two close-up interfaces (Earth globe and Orion terminal) and the
//! modal state machine that opens and closes them.
//!
//! The state machine is the only writer of [`InterpolatorTargets`]. The
//! globe, terminal and camera read those targets every frame and ease toward
//! them at a shared rate, so simultaneous transitions finish together.

pub mod globe;
pub mod interpolator;
pub mod state_machine;
pub mod terminal;
pub mod viewer;

pub use globe::GlobeState;
pub use interpolator::{InterpolatorTargets, Lerp, Smoothed};
pub use state_machine::{
    InteractionInput, InteractionMode, InteractionSettings, InteractionState,
    InteractionStateMachine, InterfaceEvent, Phase,
};
pub use terminal::TerminalState;
pub use viewer::{CommitEcho, ViewerEntry};
