use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const VERSION: u32 = 1;

const DEFAULT_API_URL: &str = "https://api.github.com";
const PLACEHOLDER_KEY: &str = "YOUR_GEMINI_API_KEY";

pub const DEFAULT_PROMPT: &str = "Translate the following Markdown document into {lang}. \
Keep the Markdown structure, front matter keys, code blocks, links and HTML tags unchanged. \
Respond with the translated document only.";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub provider: String,
    pub timeout: u32,
    pub prompt: String,
    pub gemini: GeminiConfig,
    #[serde(skip)]
    pub github: GithubConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GeminiConfig {
    pub key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
    pub max_output_tokens: Option<u32>,
    pub thinking_budget: Option<u32>,
    pub thinking_level: Option<String>,
}

/// Runner-provided settings for talking back to GitHub.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GithubConfig {
    pub token: String,
    pub api_url: String,
    pub repository: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: VERSION,
            provider: "gemini".to_string(),
            timeout: 90_000,
            prompt: DEFAULT_PROMPT.to_string(),
            gemini: GeminiConfig::default(),
            github: GithubConfig::default(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            temperature: None,
            top_p: None,
            top_k: None,
            max_output_tokens: None,
            thinking_budget: None,
            thinking_level: None,
        }
    }
}

/// Load configuration from the optional YAML file and the process environment.
pub fn load(path: Option<&Path>) -> Result<Config> {
    load_with(path, |name| std::env::var(name).ok())
}

fn load_with<F>(path: Option<&Path>, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_file(path)?,
        None => Config::default(),
    };
    apply_env(&mut config, &env);
    ensure_version(&config)?;
    ensure_credentials(&config)?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow!("Configuration file not found at {}.", path.display())
        } else {
            anyhow!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            )
        }
    })?;
    serde_yaml::from_str(&config_str).map_err(|e| {
        anyhow!(
            "Failed to parse configuration file at {}: {}",
            path.display(),
            e
        )
    })
}

// Action inputs arrive as INPUT_<NAME>; empty inputs count as unset.
fn apply_env<F>(config: &mut Config, env: &F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(key) = var("INPUT_APIKEY") {
        config.gemini.key = key;
    }
    if let Some(model) = var("INPUT_MODEL") {
        config.gemini.model = model;
    }
    if let Some(prompt) = var("INPUT_PROMPT") {
        config.prompt = prompt;
    }

    config.github = GithubConfig {
        token: var("INPUT_TOKEN")
            .or_else(|| var("GITHUB_TOKEN"))
            .unwrap_or_default(),
        api_url: var("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        repository: var("GITHUB_REPOSITORY").unwrap_or_default(),
    };
}

fn ensure_version(config: &Config) -> Result<()> {
    if config.version != VERSION {
        Err(anyhow!(
            "Configuration file version mismatch. Expected major version {}, found {}.",
            VERSION,
            config.version
        ))
    } else {
        Ok(())
    }
}

fn ensure_credentials(config: &Config) -> Result<()> {
    if config.github.token.is_empty() {
        return Err(anyhow!(
            "GitHub token is not configured. Set GITHUB_TOKEN or the `token` input."
        ));
    }
    if config.github.repository.split_once('/').is_none() {
        return Err(anyhow!(
            "GITHUB_REPOSITORY must look like owner/name, found '{}'",
            config.github.repository
        ));
    }
    Ok(())
}

impl Config {
    /// The translation prompt for `lang`.
    pub fn prompt_for(&self, lang: &str) -> String {
        self.prompt.replace("{lang}", lang)
    }

    pub fn is_placeholder_key(&self) -> bool {
        self.gemini.key.is_empty() || self.gemini.key == PLACEHOLDER_KEY
    }
}
