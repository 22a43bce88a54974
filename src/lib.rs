//! Parking Membership - paid parking-lot membership registry
//!
//! Members register a parking number by paying a one-time token fee,
//! authenticate against that number, record entry times and settle a
//! duration-based exit fee.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
