//! Postal Shipping Tariff Engine
//!
//! This crate prices domestic parcels against a postal tariff schedule: a base
//! rate keyed by service and origin/destination relation (or destination city
//! tier), excess-weight charges, volumetric weight, and the accessorial
//! surcharges that stack on top. The schedule itself is a YAML data asset
//! loaded through [`config::ConfigLoader`].

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
