use std::sync::Mutex;

use crate::providers::gemini::GeminiConfig;

/// Monotonically increasing request token for one adapter. A response may
/// only be applied while its token is still the latest issued; anything
/// older lost the race to a newer request and must be discarded.
#[derive(Default)]
pub struct RequestTracker {
  latest: Mutex<u64>,
}

impl RequestTracker {
  pub fn begin(&self) -> u64 {
    let mut latest = self.latest.lock().expect("request lock");
    *latest += 1;
    *latest
  }

  pub fn is_current(&self, token: u64) -> bool {
    *self.latest.lock().expect("request lock") == token
  }
}

#[derive(Default)]
pub struct AppState {
  config: GeminiConfig,
  pub analysis_requests: RequestTracker,
  pub image_requests: RequestTracker,
}

impl AppState {
  pub fn new(config: GeminiConfig) -> Self {
    Self {
      config,
      ..Self::default()
    }
  }

  pub fn gemini_config(&self) -> GeminiConfig {
    self.config.clone()
  }
}
