//! Satellite outdoor operation planning.
//!
//! Takes the rise/set passes produced by an external propagator and finds,
//! for each day of a forecast horizon, the operating window that lets the
//! most satellites be worked, then picks the best day.

pub mod catalog;
pub mod config;
pub mod parsing;
pub mod planner;
pub mod report;
pub mod web;
