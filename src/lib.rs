//! Rune and monster analysis for game-client account exports.
//!
//! A profile export is normalized once ([data::profile]), runes are scored and
//! matched to their owners ([runes]), and monsters are enriched with catalog
//! data from a cached remote service ([catalog]) before being joined into a
//! [roster::ProfileSnapshot].

pub mod catalog;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod roster;
pub mod runes;
pub mod server;
