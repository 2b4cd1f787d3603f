//! Frame timing.
//!
//! - one `FrameClock` per window, ticked once per presented frame
//! - `FrameRateSampler` turns those ticks into periodic FPS readings, which the
//!   demo logs next to the sprite batch's draw-call counters

mod frame_clock;

pub use frame_clock::{FrameClock, FrameRateSampler, FrameTime};
