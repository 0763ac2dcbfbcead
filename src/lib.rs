//! Principal List Library
//!
//! Wires the field to the in-memory adapters and renders it for the CLI.

pub mod cli;

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use pl_app::{FieldDeps, FieldProps, FieldRender, FieldRow, PrincipalListField};
use pl_core::config::FieldSettings;
use pl_core::ids::{PrincipalIdentifier, UserId};
use pl_core::principal::PrincipalRecord;
use pl_infra::config::{default_config_path, load_settings};
use pl_infra::{InMemoryFavoriteUsers, LoggingFieldEvents, StaticPrincipalDirectory, TracingErrorSurface};
use tracing::{info, warn};

use cli::Cli;

/// Load settings, initialize tracing and render the field to stdout.
pub async fn run(cli: Cli) -> Result<()> {
    run_to(&cli, &mut std::io::stdout()).await
}

/// [`run`] with the rendered list written to `out`.
///
/// The list is rendered into a buffer and written once every lookup has
/// settled, so `out` is never held while lookup tasks are still logging.
pub async fn run_to<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let settings = resolve_settings(cli.config.as_deref()).await?;
    pl_infra::bootstrap::tracing::init_tracing_subscriber(&settings.logging)
        .context("initialize tracing failed")?;

    let mut rendered = Vec::new();
    execute(cli, &settings, &mut rendered).await?;
    out.write_all(&rendered).context("write output failed")?;
    out.flush().context("flush output failed")?;
    Ok(())
}

async fn resolve_settings(path: Option<&Path>) -> Result<FieldSettings> {
    match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => Ok(load_settings(&path).await?),
        None => Ok(FieldSettings::default()),
    }
}

/// Build the field from `cli`, apply the requested operations, let the
/// lookups settle and write the rendered list to `out`.
pub async fn execute<W: Write>(cli: &Cli, settings: &FieldSettings, out: &mut W) -> Result<()> {
    let mut directory = StaticPrincipalDirectory::from_json_file(&cli.directory).await?;
    if cli.latency_ms > 0 {
        directory = directory.with_latency(Duration::from_millis(cli.latency_ms));
    }
    directory.set_failing(cli.fail_lookups);

    let error_surface = Arc::new(TracingErrorSurface::new());
    let favorites = Arc::new(InMemoryFavoriteUsers::new(
        cli.favorite_users.iter().map(|id| UserId::from(id.as_str())),
    ));

    let value = parse_identifiers(&cli.identifiers)?;
    let mut field = PrincipalListField::new(
        FieldProps {
            value,
            disabled: cli.disabled || settings.disabled,
            with_groups: cli.with_groups || settings.with_groups,
        },
        FieldDeps {
            lookup: Arc::new(directory),
            error_surface: error_surface.clone(),
            events: Arc::new(LoggingFieldEvents),
            favorites,
        },
    );
    field.settle().await;

    if let Some(path) = cli.add.as_deref() {
        let records = read_records(path).await?;
        info!(count = records.len(), "Adding records");
        field.add_items(records);
        field.settle().await;
    }

    for identifier in parse_identifiers(&cli.delete)? {
        if !field.delete(&identifier) {
            warn!(identifier = %identifier, "Delete ignored");
        }
    }
    field.settle().await;

    for identifier in parse_identifiers(&cli.toggle_favorite)? {
        field
            .toggle_favorite(&identifier)
            .await
            .with_context(|| format!("toggle favorite failed: {identifier}"))?;
    }

    if cli.json {
        serde_json::to_writer_pretty(&mut *out, &field.view())?;
        writeln!(out)?;
    } else {
        write_text(&field.render(), out)?;
    }

    for report in error_surface.take_reports() {
        writeln!(out, "error: {}", report.error)?;
    }
    Ok(())
}

fn parse_identifiers(values: &[String]) -> Result<Vec<PrincipalIdentifier>> {
    values
        .iter()
        .map(|value| {
            PrincipalIdentifier::parse(value)
                .with_context(|| format!("invalid identifier: {value:?}"))
        })
        .collect()
}

async fn read_records(path: &Path) -> Result<Vec<PrincipalRecord>> {
    let body = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read records failed: {}", path.display()))?;
    serde_json::from_str(&body).with_context(|| format!("parse records failed: {}", path.display()))
}

fn write_text<W: Write>(render: &FieldRender, out: &mut W) -> Result<()> {
    match render {
        FieldRender::Empty { label } => writeln!(out, "({label})")?,
        FieldRender::Rows(rows) => {
            for row in rows {
                match row {
                    FieldRow::Resolved {
                        record, favorite, ..
                    } => {
                        let icon = if record.is_group { "group" } else { "user" };
                        let star = match favorite {
                            Some(true) => " *",
                            Some(false) => " -",
                            None => "",
                        };
                        match &record.detail {
                            Some(detail) => {
                                writeln!(out, "[{icon}] {} ({detail}){star}", record.name)?
                            }
                            None => writeln!(out, "[{icon}] {}{star}", record.name)?,
                        }
                    }
                    FieldRow::Pending { entry, label } => {
                        let icon = if entry.is_group { "group" } else { "user" };
                        writeln!(out, "[{icon}] {label} ...")?;
                    }
                }
            }
        }
    }
    Ok(())
}
