//! Data arriving from outside the render loop.
//!
//! Transport is someone else's job. This crate decodes what the satellite
//! API returns, hands the newest value from a fetcher thread to the frame
//! loop, and decides when the next request may go out.

pub mod channel;
pub mod fix;
pub mod poll;

pub use channel::{FeedPublisher, LatestValue, latest_value_channel};
pub use fix::{FeedError, PlanetFix, SatelliteFix, Units, Visibility};
pub use poll::PollGate;
