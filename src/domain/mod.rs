//! Domain layer for the Burau kernel search
//!
//! This module contains the partition model, the trajectory simulator and
//! the ports the search driver talks through.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
