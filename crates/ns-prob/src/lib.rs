//! Probability building blocks for NextStat.
//!
//! Closed-form distributions validated against declared limits tables
//! ([`logistic`]).

pub mod logistic;

pub use logistic::Logistic;
