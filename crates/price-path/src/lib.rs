//! # Price-Path Simulator
//!
//! Produces the daily OHLCV table of the fictitious equity: a business-day
//! calendar, a geometric random walk with occasional news jumps, and intraday
//! open/high/low/volume derived from each day's close.
//!
//! This is a pure logic crate. It takes its parameters from `configuration`
//! and its randomness from the caller, and it performs no I/O.

pub mod calendar;
pub mod error;
pub mod simulator;

pub use calendar::business_days;
pub use error::PricePathError;
pub use simulator::PricePathSimulator;
