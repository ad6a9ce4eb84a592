//! Navigation seam

/// Options for a redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectOptions {
    /// Replace the current history entry instead of pushing a new one
    pub replace: bool,
}

impl RedirectOptions {
    /// Replace the current entry; the guarded route is not reachable with "back"
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

/// Carries out redirects decided by guards and pages
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str, options: RedirectOptions);
}
