//! Holoscope application: the frame loop and the session that owns every
//! piece of interactive state.

pub mod frame_loop;
pub mod session;

pub use frame_loop::{FIXED_DT, FixedStepLoop, MAX_FRAME_TIME};
pub use session::{FrameInput, FrameOutput, MotorStep, SATELLITE_TRAIL_LEN, Session};
