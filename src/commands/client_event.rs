use tauri::{AppHandle, Emitter, Manager, State};

use crate::events::{ClientEvent, ErrorPayload, ServerEvent};
use crate::providers::analysis::CaseCitation;
use crate::providers::error::{ProviderError, Service};
use crate::providers::gemini::{GeminiClient, GeminiConfig};
use crate::providers::image::AspectRatio;
use crate::state::AppState;

#[tauri::command]
pub async fn client_event(
  app: AppHandle,
  state: State<'_, AppState>,
  event: ClientEvent,
) -> Result<(), String> {
  match event {
    ClientEvent::AnalysisRequest { text } => {
      let text = text.trim().to_string();
      if text.is_empty() {
        return emit(
          &app,
          ServerEvent::RequestRejected {
            message: "Por favor, insira um texto para ser analisado.".into(),
          },
        );
      }

      let request_id = state.analysis_requests.begin();
      emit(&app, ServerEvent::AnalysisStarted { request_id })?;

      let config = state.gemini_config();
      let app_handle = app.clone();
      tauri::async_runtime::spawn(async move {
        let outcome = run_analysis(&config, &text).await;
        finish_analysis(&app_handle, request_id, outcome);
      });

      Ok(())
    }
    ClientEvent::ImageRequest { prompt, aspect_ratio } => {
      let prompt = prompt.trim().to_string();
      if prompt.is_empty() {
        return emit(
          &app,
          ServerEvent::RequestRejected {
            message: "Por favor, insira um prompt para gerar a imagem.".into(),
          },
        );
      }

      let request_id = state.image_requests.begin();
      emit(&app, ServerEvent::ImageStarted { request_id })?;

      let config = state.gemini_config();
      let app_handle = app.clone();
      tauri::async_runtime::spawn(async move {
        let outcome = run_image(&config, &prompt, aspect_ratio).await;
        finish_image(&app_handle, request_id, outcome);
      });

      Ok(())
    }
  }
}

async fn run_analysis(
  config: &GeminiConfig,
  text: &str,
) -> Result<Vec<CaseCitation>, ProviderError> {
  let client = GeminiClient::from_config(config, Service::Analysis)?;
  client.analyze_jurisprudence(text).await
}

async fn run_image(
  config: &GeminiConfig,
  prompt: &str,
  aspect_ratio: AspectRatio,
) -> Result<String, ProviderError> {
  let client = GeminiClient::from_config(config, Service::Image)?;
  client.generate_image(prompt, aspect_ratio).await
}

fn finish_analysis(
  app: &AppHandle,
  request_id: u64,
  outcome: Result<Vec<CaseCitation>, ProviderError>,
) {
  let state = app.state::<AppState>();
  if !state.analysis_requests.is_current(request_id) {
    log::warn!("descartando resultado de análise obsoleto (requisição {})", request_id);
    return;
  }
  let event = match outcome {
    Ok(cases) => ServerEvent::AnalysisCompleted { request_id, cases },
    Err(error) => {
      log::error!(
        "análise falhou: {}",
        error.cause().unwrap_or("causa desconhecida")
      );
      ServerEvent::AnalysisFailed {
        request_id,
        error: ErrorPayload::from(&error),
      }
    }
  };
  let _ = emit(app, event);
}

fn finish_image(app: &AppHandle, request_id: u64, outcome: Result<String, ProviderError>) {
  let state = app.state::<AppState>();
  if !state.image_requests.is_current(request_id) {
    log::warn!("descartando imagem obsoleta (requisição {})", request_id);
    return;
  }
  let event = match outcome {
    Ok(image_base64) => ServerEvent::ImageCompleted {
      request_id,
      image_base64,
    },
    Err(error) => {
      log::error!(
        "geração de imagem falhou: {}",
        error.cause().unwrap_or("causa desconhecida")
      );
      ServerEvent::ImageFailed {
        request_id,
        error: ErrorPayload::from(&error),
      }
    }
  };
  let _ = emit(app, event);
}

fn emit(app: &AppHandle, event: ServerEvent) -> Result<(), String> {
  app.emit("server-event", event).map_err(|e| e.to_string())
}
