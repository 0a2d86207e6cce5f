//! geopick-cli
//! ===========
//!
//! Command-line interface for the `geopick-core` location crate.
//!
//! The binary (`geopick`) is the deliverable; this library target only
//! carries the overview for rendered docs.
//!
//! Quick start
//! -----------
//!
//! ```text
//! geopick stats
//! geopick countries --filter united
//! geopick states 233
//! geopick --source remote --base-url https://api.example.com cities 1416
//! geopick pick 233 1416 110992
//! ```
//!
//! For programmatic access use the `geopick-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
