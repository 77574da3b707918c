//! Train journey search server.
//!
//! Loads a catalog of stations and train routes, then serves a landing page,
//! a filterable and sortable route listing with a map panel, and a JSON API
//! over the same data.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod logging;
pub mod query;
pub mod web;
