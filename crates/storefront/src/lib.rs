//! Stride Storefront library.
//!
//! Catalog queries for a shoe storefront: filtered listings, product detail
//! assembly, recommendations and review summaries, served as a JSON API.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
