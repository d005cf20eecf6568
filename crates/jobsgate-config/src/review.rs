//! Change-review configuration: where the table lives and what it is
//! compared against.

use serde::{Deserialize, Serialize};

/// Conventional main-branch designation.
fn default_base_ref() -> String {
    String::from("main")
}

/// The document the jobs table is embedded in.
fn default_readme_path() -> String {
    String::from("README.md")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewConfig {
    /// Reference name the base snapshot is read from.
    #[serde(default = "default_base_ref")]
    pub base_ref: String,

    /// Path of the README within the repository.
    #[serde(default = "default_readme_path")]
    pub readme_path: String,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            base_ref: default_base_ref(),
            readme_path: default_readme_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ReviewConfig::default();
        assert_eq!(config.base_ref, "main");
        assert_eq!(config.readme_path, "README.md");
    }
}
