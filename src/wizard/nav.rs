//! Navigation types — the forward-navigation contract between steps.

use async_trait::async_trait;

/// A forward navigation target: a path plus its query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub path: String,
    pub query: String,
}

impl Navigation {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
        }
    }

    /// Render as a pushable URL (`path` plus `?query` when non-empty).
    pub fn to_url(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

impl std::fmt::Display for Navigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_url())
    }
}

/// Side-effect seam for pushing a navigation.
///
/// The wizard core never routes by itself; the embedding UI decides
/// what a push means. Implementations handle their own failures — a
/// missed navigation is logged, never propagated.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn push(&self, navigation: &Navigation);
}

/// Navigator that only logs the push — used by the JSON API server,
/// where the browser performs the actual routing from the returned URL.
pub struct TracingNavigator;

#[async_trait]
impl Navigator for TracingNavigator {
    async fn push(&self, navigation: &Navigation) {
        tracing::info!(url = %navigation, "navigation push");
    }
}
