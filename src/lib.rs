//! Account board backend.
//!
//! Clients report account status and stat lines over HTTP; everything is
//! kept in a single JSON file.

pub mod app;
pub mod cli;
pub mod config;
pub mod routes;
pub mod store;
