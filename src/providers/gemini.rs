use std::time::Duration;

use serde_json::Value;

use super::analysis::{self, CaseCitation, ANALYSIS_MODEL};
use super::error::{classify_http_failure, classify_transport_failure, ProviderError, Service};
use super::image::{self, AspectRatio, IMAGE_MODEL};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Process-wide provider configuration, read once at startup and injected
/// into every call. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeminiConfig {
  pub api_key: Option<String>,
  pub base_url: Option<String>,
}

/// Stateless client for the two Gemini calls the application makes. Each
/// invocation is exactly one round trip; every failure leaves the boundary
/// as a classified `ProviderError`.
#[derive(Debug)]
pub struct GeminiClient {
  http: reqwest::Client,
  api_key: String,
  base_url: String,
}

impl GeminiClient {
  pub fn from_config(config: &GeminiConfig, service: Service) -> Result<Self, ProviderError> {
    let api_key = config.api_key.clone().ok_or(ProviderError::InvalidCredentials {
      cause: Some("GEMINI_API_KEY não configurada".into()),
    })?;
    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
      .build()
      .map_err(|e| classify_transport_failure(service, &e.to_string()))?;
    Ok(Self {
      http,
      api_key,
      base_url: config
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
    })
  }

  pub async fn analyze_jurisprudence(&self, text: &str) -> Result<Vec<CaseCitation>, ProviderError> {
    let body = analysis::build_request(text);
    let path = format!("models/{}:generateContent", ANALYSIS_MODEL);
    let envelope = self.post(Service::Analysis, &path, &body).await?;
    analysis::decode_citations(&envelope)
  }

  pub async fn generate_image(
    &self,
    prompt: &str,
    aspect_ratio: AspectRatio,
  ) -> Result<String, ProviderError> {
    let body = image::build_request(prompt, aspect_ratio);
    let path = format!("models/{}:predict", IMAGE_MODEL);
    let envelope = self.post(Service::Image, &path, &body).await?;
    image::extract_payload(&envelope)
  }

  async fn post(&self, service: Service, path: &str, body: &Value) -> Result<Value, ProviderError> {
    let url = format!(
      "{}/{}?key={}",
      self.base_url.trim_end_matches('/'),
      path,
      self.api_key
    );

    let response = self.http.post(&url).json(body).send().await.map_err(|e| {
      log::error!("requisição a {} não chegou ao serviço: {}", path, e);
      classify_transport_failure(service, &e.to_string())
    })?;

    let status = response.status();
    let text = response.text().await.map_err(|e| {
      log::error!("falha ao ler resposta de {}: {}", path, e);
      classify_transport_failure(service, &e.to_string())
    })?;

    if !status.is_success() {
      let error = classify_http_failure(service, status.as_u16(), &text);
      log::error!(
        "requisição a {} rejeitada: {}",
        path,
        error.cause().unwrap_or("causa desconhecida")
      );
      return Err(error);
    }

    serde_json::from_str(&text).map_err(|e| {
      log::error!("envelope de resposta de {} não é JSON: {}", path, e);
      classify_transport_failure(service, &format!("envelope de resposta inválido: {}", e))
    })
  }
}
