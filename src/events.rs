use serde::{Deserialize, Serialize};

use crate::providers::analysis::CaseCitation;
use crate::providers::error::{ErrorKind, ProviderError};
use crate::providers::image::AspectRatio;

/// Failure as presented to the UI: a machine-readable kind for
/// pattern-matching plus the fixed user-visible message. The underlying
/// cause never crosses this boundary.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ErrorPayload {
  pub kind: ErrorKind,
  pub message: String,
}

impl From<&ProviderError> for ErrorPayload {
  fn from(error: &ProviderError) -> Self {
    Self {
      kind: error.kind(),
      message: error.to_string(),
    }
  }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(tag = "type", content = "payload")]
pub enum ClientEvent {
  #[serde(rename = "analysis.request")]
  AnalysisRequest { text: String },
  #[serde(rename = "image.request")]
  ImageRequest {
    prompt: String,
    #[serde(rename = "aspectRatio")]
    aspect_ratio: AspectRatio,
  },
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(tag = "type", content = "payload")]
pub enum ServerEvent {
  #[serde(rename = "request.rejected")]
  RequestRejected { message: String },
  #[serde(rename = "analysis.started")]
  AnalysisStarted {
    #[serde(rename = "requestId")]
    request_id: u64,
  },
  #[serde(rename = "analysis.completed")]
  AnalysisCompleted {
    #[serde(rename = "requestId")]
    request_id: u64,
    cases: Vec<CaseCitation>,
  },
  #[serde(rename = "analysis.failed")]
  AnalysisFailed {
    #[serde(rename = "requestId")]
    request_id: u64,
    error: ErrorPayload,
  },
  #[serde(rename = "image.started")]
  ImageStarted {
    #[serde(rename = "requestId")]
    request_id: u64,
  },
  #[serde(rename = "image.completed")]
  ImageCompleted {
    #[serde(rename = "requestId")]
    request_id: u64,
    #[serde(rename = "imageBase64")]
    image_base64: String,
  },
  #[serde(rename = "image.failed")]
  ImageFailed {
    #[serde(rename = "requestId")]
    request_id: u64,
    error: ErrorPayload,
  },
}
