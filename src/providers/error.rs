use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Service {
  Analysis,
  Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
  InvalidCredentials,
  ResponseFormat,
  Communication,
  NoImage,
}

/// Classified failure of one provider call. `Display` is the fixed
/// user-visible message for the kind; the cause is diagnostics-only and
/// never shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
  #[error("Chave de API inválida ou não configurada. Verifique suas credenciais.")]
  InvalidCredentials { cause: Option<String> },
  #[error("A resposta da IA não estava em um formato JSON válido.")]
  ResponseFormat { cause: String },
  #[error("Falha ao comunicar com a API Gemini. A rede pode estar instável ou o serviço indisponível.")]
  AnalysisUnavailable { cause: Option<String> },
  #[error("Falha ao comunicar com a API Gemini para geração de imagem.")]
  ImageUnavailable { cause: Option<String> },
  #[error("A API não retornou nenhuma imagem. Tente um prompt diferente.")]
  NoImageProduced,
}

impl ProviderError {
  pub fn unavailable(service: Service, cause: impl Into<String>) -> Self {
    let cause = Some(cause.into());
    match service {
      Service::Analysis => ProviderError::AnalysisUnavailable { cause },
      Service::Image => ProviderError::ImageUnavailable { cause },
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      ProviderError::InvalidCredentials { .. } => ErrorKind::InvalidCredentials,
      ProviderError::ResponseFormat { .. } => ErrorKind::ResponseFormat,
      ProviderError::AnalysisUnavailable { .. } => ErrorKind::Communication,
      ProviderError::ImageUnavailable { .. } => ErrorKind::Communication,
      ProviderError::NoImageProduced => ErrorKind::NoImage,
    }
  }

  pub fn cause(&self) -> Option<&str> {
    match self {
      ProviderError::InvalidCredentials { cause } => cause.as_deref(),
      ProviderError::ResponseFormat { cause } => Some(cause.as_str()),
      ProviderError::AnalysisUnavailable { cause } => cause.as_deref(),
      ProviderError::ImageUnavailable { cause } => cause.as_deref(),
      ProviderError::NoImageProduced => None,
    }
  }
}

/// Classify a failure that never produced an HTTP response (connect errors,
/// timeouts, body-read errors).
pub fn classify_transport_failure(service: Service, cause: &str) -> ProviderError {
  if mentions_credentials(cause) {
    return ProviderError::InvalidCredentials {
      cause: Some(cause.to_string()),
    };
  }
  ProviderError::unavailable(service, cause)
}

/// Classify a non-success HTTP response. Credential failures are recognized
/// by status code first, then by the provider's `error.status` field, and
/// only last by the API-key wording the provider uses.
pub fn classify_http_failure(service: Service, status: u16, body: &str) -> ProviderError {
  let (message, api_status) = probe_error_body(body);
  let credentials = status == 401
    || status == 403
    || matches!(
      api_status.as_deref(),
      Some("UNAUTHENTICATED") | Some("PERMISSION_DENIED")
    )
    || mentions_credentials(&message);
  let cause = format!("HTTP {}: {}", status, message);
  if credentials {
    return ProviderError::InvalidCredentials { cause: Some(cause) };
  }
  ProviderError::unavailable(service, cause)
}

fn probe_error_body(body: &str) -> (String, Option<String>) {
  match serde_json::from_str::<Value>(body) {
    Ok(value) => {
      let message = value["error"]["message"]
        .as_str()
        .unwrap_or(body)
        .to_string();
      let api_status = value["error"]["status"].as_str().map(String::from);
      (message, api_status)
    }
    Err(_) => (body.to_string(), None),
  }
}

fn mentions_credentials(message: &str) -> bool {
  message.contains("API key") || message.contains("API_KEY")
}
