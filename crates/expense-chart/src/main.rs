mod bootstrap;

use anyhow::Result;
use chart_core::formatting::format_currency;
use chart_core::settings::{Command, Settings};
use chart_runtime::orchestrator::FeedOrchestrator;
use chart_runtime::writer::StoreHandle;
use chart_store::store::ExpenseStore;
use chart_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Expense Chart v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Theme: {}, Refresh: {}s, Animation: {}ms",
        settings.theme,
        settings.refresh_rate,
        settings.animation_ms
    );

    let collection_path = settings
        .data_path
        .clone()
        .unwrap_or_else(bootstrap::default_collection_path);
    let store = ExpenseStore::open(&collection_path)?;

    match settings.command {
        Some(Command::Add { ref name, cost }) => {
            let record = store.insert(name, cost)?;
            println!(
                "added {} : {} ({})",
                record.name,
                format_currency(record.cost),
                record.id
            );
        }

        Some(Command::List) => {
            // Same order the chart feed delivers: cost ascending.
            let records = store.snapshot()?;
            if records.is_empty() {
                println!("no expenses yet");
            } else {
                for record in &records {
                    println!(
                        "{:<24} {:>12}  {}",
                        record.name,
                        format_currency(record.cost),
                        record.id
                    );
                }
            }
        }

        None => {
            tracing::info!(path = %collection_path.display(), "watching collection");

            let orchestrator =
                FeedOrchestrator::new(u64::from(settings.refresh_rate), store.clone());
            let (rx, handle) = orchestrator.start();

            let app = App::new(&settings.theme, settings.animation_ms, StoreHandle::new(store));

            // Run the TUI event loop. The loop exits on 'q' / Ctrl+C inside the TUI.
            // We also listen for Ctrl+C at the OS level so that signals received
            // while the terminal is in raw mode are handled cleanly.
            tokio::select! {
                result = app.run(rx) => {
                    handle.abort();
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down feed task");
                    handle.abort();
                }
            }
        }
    }

    Ok(())
}
