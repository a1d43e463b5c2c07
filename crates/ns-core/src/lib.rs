//! Core types shared by NextStat probability crates.
//!
//! - [`Error`] / [`Result`]: the error type every distribution returns
//! - [`limits`]: declared parameter domains and the shared bounds check

pub mod error;
pub mod limits;

pub use error::{Error, Result};
pub use limits::{Bound, Interval, Limits, check_limits};
