use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::providers::image::{aspect_ratio_options, AspectRatioOption};

#[tauri::command]
pub fn aspect_ratios() -> Vec<AspectRatioOption> {
  aspect_ratio_options()
}

/// Write a generated image to the path the user picked in the save dialog.
/// The payload arrives in the provider's transport encoding.
#[tauri::command]
pub fn save_image(path: String, image_base64: String) -> Result<(), String> {
  let bytes = decode_png_payload(&image_base64)?;
  std::fs::write(&path, bytes).map_err(|e| e.to_string())
}

fn decode_png_payload(payload: &str) -> Result<Vec<u8>, String> {
  BASE64
    .decode(payload.trim())
    .map_err(|e| format!("imagem em formato inválido: {}", e))
}
