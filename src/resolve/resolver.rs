use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::http::mime::MimeTable;
use crate::resolve::context::RequestContext;
use crate::resolve::guard::{Access, AccessGuard};
use crate::resolve::outcome::ResponseOutcome;
use crate::resolve::path::PathResolver;

/// Decides what a request gets: a file, a 403, or a 404.
///
/// The order is fixed: canonicalize, check the blacklist, check root
/// containment, check for a regular file, read it. Canonicalization happens
/// before any filesystem lookup so a symlink cannot carry a blacklisted
/// target past the guard.
///
/// Resolution is synchronous; callers on an async runtime should run it on a
/// blocking thread.
#[derive(Debug, Clone)]
pub struct ResponseResolver {
    paths: PathResolver,
    guard: AccessGuard,
    mime: MimeTable,
}

impl ResponseResolver {
    pub fn new(paths: PathResolver, guard: AccessGuard, mime: MimeTable) -> Self {
        Self { paths, guard, mime }
    }

    pub fn from_config(cfg: &ServerConfig) -> Self {
        Self {
            paths: cfg.paths.clone(),
            guard: AccessGuard::new(cfg.blacklist.clone()),
            mime: cfg.mime.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        self.paths.root()
    }

    /// Resolves `ctx.raw_path`, records the canonical path and the outcome on
    /// the context, and returns the outcome.
    pub fn resolve<'c>(&self, ctx: &'c mut RequestContext) -> &'c ResponseOutcome {
        let canonical = self.paths.resolve(&ctx.raw_path);
        let outcome = self.decide(&canonical);
        ctx.set_resolved_path(canonical);
        ctx.decide(outcome)
    }

    /// Resolves a bare request path without a context.
    pub fn resolve_path(&self, request_path: &str) -> ResponseOutcome {
        self.decide(&self.paths.resolve(request_path))
    }

    fn decide(&self, canonical: &Path) -> ResponseOutcome {
        if let Access::Denied(prefix) = self.guard.check(canonical) {
            debug!("{} denied by blacklist entry {}", canonical.display(), prefix.display());
            return ResponseOutcome::Forbidden;
        }

        if !canonical.starts_with(self.paths.root()) {
            debug!("{} lies outside the serving root", canonical.display());
            return ResponseOutcome::NotFound;
        }

        match fs::metadata(canonical) {
            Ok(meta) if meta.is_file() => {}
            _ => return ResponseOutcome::NotFound,
        }

        match fs::read(canonical) {
            Ok(content) => ResponseOutcome::Ok {
                content,
                mime_type: self.mime.classify_path(canonical).to_string(),
            },
            Err(e) => {
                warn!("Failed to read {}: {}", canonical.display(), e);
                ResponseOutcome::NotFound
            }
        }
    }
}
