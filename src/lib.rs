//! JustTip engine.
//!
//! Rosters employees onto shifts without double-booking and splits each
//! day's pooled tips across the employees who worked that day, in
//! proportion to their hours.
//!
//! The pure parts live in [`validation`] (interval and date rules) and
//! [`calculation`] (shift duration, weekly allocation). [`services`] wires
//! them to the [`store`] traits and [`api`] exposes them over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod validation;
