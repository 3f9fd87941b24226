// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod commands;
mod config;
mod events;
mod providers;
mod state;

#[tauri::command]
fn ping_cmd() -> &'static str {
  assistente_juridico_lib::ping()
}

fn main() {
  let gemini_config = config::load();

  tauri::Builder::default()
    .manage(state::AppState::new(gemini_config))
    .setup(|app| {
      if cfg!(debug_assertions) {
        app.handle().plugin(
          tauri_plugin_log::Builder::default()
            .level(log::LevelFilter::Info)
            .build(),
        )?;
      }
      Ok(())
    })
    .plugin(tauri_plugin_dialog::init())
    .invoke_handler(tauri::generate_handler![
      ping_cmd,
      commands::client_event::client_event,
      commands::image::aspect_ratios,
      commands::image::save_image
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}
