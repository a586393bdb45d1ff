//! Tauri application library. Commands cover config, chat send, connection
//! test, transcript export, and localized labels.

pub mod commands;

pub fn run() {
    tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            commands::get_config_path,
            commands::load_config,
            commands::save_config,
            commands::send_message,
            commands::test_connection,
            commands::clear_conversation,
            commands::export_conversation,
            commands::conversation_snapshot,
            commands::ui_texts,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|_app, event| {
            // Config is persisted on shutdown with whatever was last loaded.
            if let tauri::RunEvent::Exit = event {
                commands::persist_current_config();
            }
        });
}
