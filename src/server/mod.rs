//! Accept loop and the state shared by every connection.

pub mod listener;

pub use listener::Dispatcher;

use crate::config::ServerConfig;
use crate::http::response::Response;
use crate::resolve::{ResponseOutcome, ResponseResolver};

/// Read-only per-process state handed to each connection.
#[derive(Debug)]
pub struct Site {
    pub resolver: ResponseResolver,
    pub not_found_page: Vec<u8>,
}

impl Site {
    pub fn from_config(cfg: &ServerConfig) -> Self {
        Self {
            resolver: ResponseResolver::from_config(cfg),
            not_found_page: cfg.not_found_page.clone(),
        }
    }

    pub fn respond(&self, outcome: ResponseOutcome) -> Response {
        outcome.into_response(&self.not_found_page)
    }
}
