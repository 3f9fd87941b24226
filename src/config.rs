use crate::providers::gemini::GeminiConfig;

const API_KEY_ENV: &str = "GEMINI_API_KEY";
const BASE_URL_ENV: &str = "GEMINI_BASE_URL";

/// Read provider configuration from the environment. Called once at
/// process start; the result is managed state and read-only afterwards.
pub fn load() -> GeminiConfig {
  GeminiConfig {
    api_key: normalize_value(std::env::var(API_KEY_ENV).ok()),
    base_url: normalize_value(std::env::var(BASE_URL_ENV).ok()),
  }
}

fn normalize_value(value: Option<String>) -> Option<String> {
  value
    .map(|raw| raw.trim().to_string())
    .filter(|value| !value.is_empty())
}
