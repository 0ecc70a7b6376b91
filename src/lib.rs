//! fileward - minimal static file server
//!
//! Maps request paths onto a serving directory, refuses blacklisted
//! prefixes with 403, answers missing files with a configurable 404 page
//! and serves everything else with a content type chosen by extension.

pub mod config;
pub mod http;
pub mod logging;
pub mod resolve;
pub mod server;
