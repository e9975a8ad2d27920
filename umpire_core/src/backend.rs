use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Graphite render API, the default backend
    #[default]
    Graphite,

    /// Librato metrics API
    Librato,
}

impl Backend {
    /// Only an explicit `librato` selects Librato; everything else is Graphite.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("librato") => Backend::Librato,
            _ => Backend::Graphite,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Graphite => "graphite",
            Backend::Librato => "librato",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_selector() {
        assert_eq!(Backend::from_selector(Some("librato")), Backend::Librato);
        assert_eq!(Backend::from_selector(Some("graphite")), Backend::Graphite);
        assert_eq!(Backend::from_selector(Some("datadog")), Backend::Graphite);
        assert_eq!(Backend::from_selector(None), Backend::Graphite);
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(Backend::Librato.to_string(), "librato");
        assert_eq!(Backend::default().name(), "graphite");
    }
}
