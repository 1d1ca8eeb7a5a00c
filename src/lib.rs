//! Stay Cost & Points Calculation Engine
//!
//! This crate computes the nightly and total points/cost of a stay in a
//! vacation-ownership points program, resolving seasonal rate calendars and
//! holiday overrides, applying configured discount rules, and pricing the
//! result under either an owner (amortized) or renter (cash) cost model.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
