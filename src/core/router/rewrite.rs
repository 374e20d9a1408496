//! Path rewrite rules

use crate::config::RewriteConfig;

/// Maps `(inbound path, matched prefix)` to the path sent to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathRewrite {
    /// Forward the inbound path unchanged
    Identity,
    /// Replace the matched prefix with a fixed string
    Substitute(String),
    /// Drop the matched prefix and forward the remainder
    Strip,
}

impl PathRewrite {
    /// Apply the rule
    ///
    /// `path` is the path component only; the query string travels
    /// separately and is never touched here. Callers guarantee `prefix` is a
    /// prefix of `path`. Anything after the prefix is kept. A rewrite that
    /// would leave an empty path yields `/`.
    pub fn apply(&self, path: &str, prefix: &str) -> String {
        let rest = path.strip_prefix(prefix).unwrap_or(path);

        match self {
            PathRewrite::Identity => path.to_string(),
            PathRewrite::Substitute(replacement) => {
                let rewritten = format!("{}{}", replacement, rest);
                ensure_absolute(rewritten)
            }
            PathRewrite::Strip => ensure_absolute(rest.to_string()),
        }
    }
}

fn ensure_absolute(path: String) -> String {
    if path.starts_with('/') {
        path
    } else {
        format!("/{}", path)
    }
}

impl From<&RewriteConfig> for PathRewrite {
    fn from(config: &RewriteConfig) -> Self {
        match config {
            RewriteConfig::Identity => PathRewrite::Identity,
            RewriteConfig::Substitute { replacement } => PathRewrite::Substitute(replacement.clone()),
            RewriteConfig::Strip => PathRewrite::Strip,
        }
    }
}
