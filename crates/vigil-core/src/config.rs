use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::VigilError;

/// Top-level configuration loaded from `.vigil.toml`.
///
/// Every field is defaulted, so an absent config file behaves exactly like
/// an empty one. CLI flags override config values; config overrides defaults.
///
/// # Examples
///
/// ```
/// use vigil_core::VigilConfig;
///
/// let config = VigilConfig::default();
/// assert_eq!(config.llm.max_tokens, 4096);
/// assert_eq!(config.review.max_diff_chars, 15_000);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VigilConfig {
    /// Inference provider settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Review run settings.
    #[serde(default)]
    pub review: ReviewConfig,
}

impl VigilConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Io`] if the file cannot be read, or
    /// [`VigilError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use vigil_core::VigilConfig;
    /// use std::path::Path;
    ///
    /// let config = VigilConfig::from_file(Path::new(".vigil.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, VigilError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigil_core::VigilConfig;
    ///
    /// let toml = r#"
    /// [review]
    /// max_diff_chars = 8000
    /// "#;
    /// let config = VigilConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.review.max_diff_chars, 8000);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, VigilError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// Inference provider configuration.
///
/// Targets the Amazon Bedrock runtime API serving Anthropic models. The
/// region is selected by overriding `base_url`.
///
/// # Examples
///
/// ```
/// use vigil_core::LlmConfig;
///
/// let config = LlmConfig::default();
/// assert!(config.model.starts_with("anthropic.claude"));
/// assert_eq!(config.anthropic_version, "bedrock-2023-05-31");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Bedrock model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Protocol version tag sent in every request body.
    #[serde(default = "default_anthropic_version")]
    pub anthropic_version: String,
    /// API key (bearer token). Falls back to `AWS_BEARER_TOKEN_BEDROCK`.
    pub api_key: Option<String>,
    /// Custom base URL for the Bedrock runtime endpoint.
    pub base_url: Option<String>,
    /// Maximum output tokens per request.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_model() -> String {
    "anthropic.claude-3-5-sonnet-20241022-v2:0".into()
}

fn default_anthropic_version() -> String {
    "bedrock-2023-05-31".into()
}

fn default_max_tokens() -> u32 {
    4096
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            anthropic_version: default_anthropic_version(),
            api_key: None,
            base_url: None,
            max_tokens: default_max_tokens(),
        }
    }
}

/// Review run configuration.
///
/// # Examples
///
/// ```
/// use vigil_core::ReviewConfig;
/// use std::path::PathBuf;
///
/// let config = ReviewConfig::default();
/// assert_eq!(config.input, PathBuf::from("prs.json"));
/// assert_eq!(config.output, PathBuf::from("review_results.md"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Hard cutoff on diff characters embedded in the prompt (default: 15000).
    #[serde(default = "default_max_diff_chars")]
    pub max_diff_chars: usize,
    /// JSON file listing the pull requests to review.
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Markdown report file to write.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_max_diff_chars() -> usize {
    15_000
}

fn default_input() -> PathBuf {
    PathBuf::from("prs.json")
}

fn default_output() -> PathBuf {
    PathBuf::from("review_results.md")
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            max_diff_chars: default_max_diff_chars(),
            input: default_input(),
            output: default_output(),
        }
    }
}
