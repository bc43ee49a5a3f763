//! Core library for the Aurelian Estates site: the static portfolio catalog,
//! JSON-LD/sitemap/robots generation, the fire-and-forget analytics emitter,
//! and the engagement state machines (inquiry forms and the vault gate).
//!
//! Everything here is presentation-free; the HTTP surface lives in the
//! `aurelian-api` service crate.

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod engagement;
pub mod error;
pub mod seo;
pub mod telemetry;
