use agenda_app::config::{build_service, load_config, resolve_anchor};
use agenda_app::report::CalendarReport;
use chrono::Utc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    // stdout carries the report
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let service = build_service(&config)?;
    let anchor = resolve_anchor(&config, Utc::now())?;
    let viewer = config.query.viewer_id;
    let view = config.query.view;

    tracing::info!(
        viewer = %viewer,
        view = ?view,
        %anchor,
        events_path = %config.query.events_path,
        "Querying calendar"
    );

    let snapshot = service.snapshot_for_view(viewer, view, anchor).await?;
    let report = CalendarReport::build(&snapshot, view, anchor, &config.filters);

    tracing::info!(
        occurrences = report.occurrences.len(),
        days = report.days.len(),
        "Calendar query complete"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
