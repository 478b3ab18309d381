use crate::document::OverlapPolicy;
use crate::error::{MarkupError, MarkupResult};
use crate::segment::HeadingLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Render and assembly settings, loaded from YAML.
///
/// Every section is optional; missing fields fall back to the built-in
/// presentation table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub headings: HeadingClasses,
    pub links: LinkConfig,
    pub embeds: EmbedConfig,
    pub assembly: AssemblyConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingClasses {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h3: Option<String>,
}

impl HeadingClasses {
    /// CSS class for a heading level, the override if set, else the default style.
    pub fn class_for(&self, level: HeadingLevel) -> &str {
        let custom = match level {
            HeadingLevel::H1 => self.h1.as_deref(),
            HeadingLevel::H2 => self.h2.as_deref(),
            HeadingLevel::H3 => self.h3.as_deref(),
        };
        custom.unwrap_or(level.style().class)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub class: String,
    pub rel: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            class: "forum-link".to_string(),
            rel: "noopener noreferrer".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    pub pet_profile_class: String,
    pub poll_class: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            pet_profile_class: "forum-embed-pet-profile".to_string(),
            poll_class: "forum-embed-poll".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    pub overlap: OverlapPolicy,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a YAML config.
    pub fn from_yaml(yaml: &str) -> MarkupResult<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML config file.
    pub fn load(path: &Path) -> MarkupResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| MarkupError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loading markup config");
        Self::from_yaml(&content)
    }

    pub fn validate(&self) -> MarkupResult<()> {
        for level in HeadingLevel::ALL {
            validate_class_list(
                &format!("headings.h{}", level.number()),
                self.headings.class_for(level),
            )?;
        }
        validate_class_list("links.class", &self.links.class)?;
        validate_class_list("embeds.pet_profile_class", &self.embeds.pet_profile_class)?;
        validate_class_list("embeds.poll_class", &self.embeds.poll_class)?;

        if self.links.rel.chars().any(|c| matches!(c, '"' | '<' | '>')) {
            return Err(MarkupError::InvalidConfigValue {
                field: "links.rel".to_string(),
                reason: "must not contain quotes or angle brackets".to_string(),
            });
        }
        Ok(())
    }
}

/// Space-separated CSS classes: non-empty, each token made of safe characters.
fn validate_class_list(field: &str, value: &str) -> MarkupResult<()> {
    if value.trim().is_empty() {
        return Err(MarkupError::InvalidConfigValue {
            field: field.to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let safe = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '/' | '.');
    if value.split_whitespace().any(|token| !token.chars().all(safe)) {
        return Err(MarkupError::InvalidConfigValue {
            field: field.to_string(),
            reason: "class names may contain only alphanumerics, -, _, :, / and .".to_string(),
        });
    }
    Ok(())
}
