use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::ProviderError;

pub const IMAGE_MODEL: &str = "imagen-4.0-generate-001";

/// The closed set of aspect ratios the image model accepts. Serialized with
/// the provider's own ratio strings so the value crosses the UI boundary
/// and the wire unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AspectRatio {
  #[serde(rename = "1:1")]
  Square,
  #[serde(rename = "16:9")]
  Landscape,
  #[serde(rename = "9:16")]
  Portrait,
  #[serde(rename = "4:3")]
  Standard,
  #[serde(rename = "3:4")]
  StandardPortrait,
}

impl AspectRatio {
  pub const ALL: [AspectRatio; 5] = [
    AspectRatio::Square,
    AspectRatio::Landscape,
    AspectRatio::Portrait,
    AspectRatio::Standard,
    AspectRatio::StandardPortrait,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      AspectRatio::Square => "1:1",
      AspectRatio::Landscape => "16:9",
      AspectRatio::Portrait => "9:16",
      AspectRatio::Standard => "4:3",
      AspectRatio::StandardPortrait => "3:4",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      AspectRatio::Square => "Quadrado (1:1)",
      AspectRatio::Landscape => "Paisagem (16:9)",
      AspectRatio::Portrait => "Retrato (9:16)",
      AspectRatio::Standard => "Padrão (4:3)",
      AspectRatio::StandardPortrait => "Retrato Padrão (3:4)",
    }
  }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct AspectRatioOption {
  pub value: AspectRatio,
  pub label: String,
}

pub fn aspect_ratio_options() -> Vec<AspectRatioOption> {
  AspectRatio::ALL
    .iter()
    .map(|ratio| AspectRatioOption {
      value: *ratio,
      label: ratio.label().to_string(),
    })
    .collect()
}

pub fn build_request(prompt: &str, aspect_ratio: AspectRatio) -> Value {
  json!({
    "instances": [{ "prompt": prompt }],
    "parameters": {
      "numberOfImages": 1,
      "aspectRatio": aspect_ratio.as_str(),
      "outputMimeType": "image/png"
    }
  })
}

/// Pull the first generated image out of a `predict` envelope. The payload
/// stays in the provider's transport encoding (base64 PNG bytes); an empty
/// result set is a failure, never an empty success.
pub fn extract_payload(envelope: &Value) -> Result<String, ProviderError> {
  let payload = envelope["predictions"]
    .as_array()
    .and_then(|predictions| predictions.first())
    .and_then(|prediction| prediction["bytesBase64Encoded"].as_str())
    .unwrap_or("");
  if payload.is_empty() {
    return Err(ProviderError::NoImageProduced);
  }
  Ok(payload.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn build_request_matches_provider_contract() {
    let request = build_request("a red robot on a skateboard", AspectRatio::Landscape);
    assert_eq!(request["instances"][0]["prompt"], "a red robot on a skateboard");
    assert_eq!(request["parameters"]["numberOfImages"], 1);
    assert_eq!(request["parameters"]["aspectRatio"], "16:9");
    assert_eq!(request["parameters"]["outputMimeType"], "image/png");
  }

  #[test]
  fn build_request_accepts_every_ratio() {
    for ratio in AspectRatio::ALL {
      let request = build_request("qualquer prompt", ratio);
      assert_eq!(request["parameters"]["aspectRatio"], ratio.as_str());
      assert_eq!(request["parameters"]["numberOfImages"], 1);
    }
  }

  #[test]
  fn aspect_ratio_serializes_as_ratio_string() {
    let json = serde_json::to_string(&AspectRatio::Portrait).unwrap();
    assert_eq!(json, "\"9:16\"");
    let ratio: AspectRatio = serde_json::from_str("\"4:3\"").unwrap();
    assert_eq!(ratio, AspectRatio::Standard);
  }

  #[test]
  fn options_pair_every_ratio_with_its_label() {
    let options = aspect_ratio_options();
    assert_eq!(options.len(), 5);
    assert_eq!(options[0].value, AspectRatio::Square);
    assert_eq!(options[0].label, "Quadrado (1:1)");
    assert_eq!(options[4].label, "Retrato Padrão (3:4)");
  }

  #[test]
  fn extract_returns_first_payload() {
    let envelope = serde_json::json!({
      "predictions": [
        { "bytesBase64Encoded": "aW1hZ2VtLXVt", "mimeType": "image/png" },
        { "bytesBase64Encoded": "aW1hZ2VtLWRvaXM=", "mimeType": "image/png" }
      ]
    });
    assert_eq!(extract_payload(&envelope).unwrap(), "aW1hZ2VtLXVt");
  }

  #[test]
  fn empty_result_set_is_a_failure() {
    let envelope = serde_json::json!({ "predictions": [] });
    assert_eq!(
      extract_payload(&envelope).unwrap_err(),
      ProviderError::NoImageProduced
    );

    let envelope = serde_json::json!({});
    assert_eq!(
      extract_payload(&envelope).unwrap_err(),
      ProviderError::NoImageProduced
    );
  }

  #[test]
  fn prediction_without_payload_is_a_failure() {
    let envelope = serde_json::json!({
      "predictions": [{ "mimeType": "image/png" }]
    });
    assert_eq!(
      extract_payload(&envelope).unwrap_err(),
      ProviderError::NoImageProduced
    );

    let envelope = serde_json::json!({
      "predictions": [{ "bytesBase64Encoded": "" }]
    });
    assert_eq!(
      extract_payload(&envelope).unwrap_err(),
      ProviderError::NoImageProduced
    );
  }
}
