//! Navigation seam used by redirects.

/// Something that can move the user to another route.
pub trait Navigator {
    /// Navigates to `path`.
    fn push(&mut self, path: &str);
}

/// Navigator that records every route it was sent to.
#[derive(Debug, Clone, Default)]
pub struct HistoryNavigator {
    history: Vec<String>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent route, if any.
    pub fn current(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    /// All routes in visiting order.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Navigator for HistoryNavigator {
    fn push(&mut self, path: &str) {
        tracing::debug!(path, "Navigating");
        self.history.push(path.to_string());
    }
}
