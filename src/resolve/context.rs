use std::path::{Path, PathBuf};

use crate::resolve::outcome::ResponseOutcome;

/// Per-request state, owned by the unit of work handling one request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Decoded request path, starting with `/`.
    pub raw_path: String,
    /// Remote peer, for logging.
    pub client: String,
    resolved_path: Option<PathBuf>,
    outcome: Option<ResponseOutcome>,
}

impl RequestContext {
    pub fn new(raw_path: impl Into<String>, client: impl Into<String>) -> Self {
        Self {
            raw_path: raw_path.into(),
            client: client.into(),
            resolved_path: None,
            outcome: None,
        }
    }

    /// Canonical filesystem path, once resolved.
    pub fn resolved_path(&self) -> Option<&Path> {
        self.resolved_path.as_deref()
    }

    pub fn outcome(&self) -> Option<&ResponseOutcome> {
        self.outcome.as_ref()
    }

    pub fn into_outcome(self) -> Option<ResponseOutcome> {
        self.outcome
    }

    pub(crate) fn set_resolved_path(&mut self, path: PathBuf) {
        self.resolved_path = Some(path);
    }

    pub(crate) fn decide(&mut self, outcome: ResponseOutcome) -> &ResponseOutcome {
        self.outcome.insert(outcome)
    }
}
