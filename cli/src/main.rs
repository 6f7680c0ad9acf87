//! CLI entrypoint for ewp-commlog
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use commlog_application::{
    CommunicationLogRepository, DecodeBatchUseCase, DecodeParams, DecodeReport,
    InspectLogsInput, InspectLogsUseCase, RepositoryError,
};
use commlog_domain::{CommunicationLogFilter, OutputFormat, UnknownFieldPolicy, VariantRegistry};
use commlog_infrastructure::{
    ConfigLoader, FileConfig, InMemoryCommunicationLogRepository, JsonlDetailSink,
    JsonlRecordSource,
};
use commlog_presentation::{Cli, Command, ConsoleFormatter, ProgressReporter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = load_config(&cli)?;

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }
    let format = cli
        .output
        .map(OutputFormat::from)
        .unwrap_or_else(|| config.output.format());

    let mut params = config.decode.to_params();
    if cli.ignore_unknown_fields {
        params = params.with_unknown_fields(UnknownFieldPolicy::Ignore);
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Decode {
            file,
            write,
            concurrency,
        } => {
            if let Some(concurrency) = concurrency {
                params = params.with_concurrency(concurrency);
            }
            let report = decode(&file, write.as_deref(), params, cli.quiet).await?;
            let output = match format {
                OutputFormat::Table => ConsoleFormatter::format_report(&report),
                OutputFormat::Json => ConsoleFormatter::format_report_json(&report),
            };
            println!("{}", output);
        }
        Command::Inspect {
            file,
            filter,
            offset,
            limit,
            id,
        } => {
            let report = decode(&file, None, params, true).await?;
            if report.rejected_count() > 0 {
                warn!(
                    "{} record(s) in {} were rejected; run `decode` for details",
                    report.rejected_count(),
                    file.display()
                );
            }

            let repository = Arc::new(InMemoryCommunicationLogRepository::new());
            for detail in report.into_accepted() {
                if let Err(RepositoryError::DuplicateId(id)) = repository.save(detail).await {
                    warn!("Skipping duplicate communication log id {}", id);
                }
            }

            let use_case =
                InspectLogsUseCase::new(repository).with_params(config.query.to_params());
            let output = if let Some(id) = id {
                let view = use_case.find_by_id(id).await?;
                match format {
                    OutputFormat::Table => ConsoleFormatter::format_detail(
                        &view,
                        config.query.observations_max_length,
                    ),
                    OutputFormat::Json => ConsoleFormatter::format_detail_json(&view),
                }
            } else {
                let filter = match filter {
                    Some(text) => CommunicationLogFilter::parse(&text)?,
                    None => CommunicationLogFilter::match_all(),
                };
                let mut input = InspectLogsInput::new(filter).with_offset(offset);
                if let Some(limit) = limit {
                    input = input.with_limit(limit);
                }
                let page = use_case.find_by_filter(input).await?;
                match format {
                    OutputFormat::Table => ConsoleFormatter::format_page(&page),
                    OutputFormat::Json => ConsoleFormatter::format_page_json(&page),
                }
            };
            println!("{}", output);
        }
        Command::Registry => {
            let registry = VariantRegistry::standard();
            let output = match format {
                OutputFormat::Table => ConsoleFormatter::format_registry(registry),
                OutputFormat::Json => ConsoleFormatter::format_registry_json(registry),
            };
            println!("{}", output);
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let mut fatal = false;
    for issue in config.validate() {
        if issue.is_error() {
            tracing::error!("{}", issue.message);
            fatal = true;
        } else {
            warn!("{}", issue.message);
        }
    }
    if fatal {
        bail!("Invalid configuration");
    }
    Ok(config)
}

async fn decode(
    file: &Path,
    write: Option<&Path>,
    params: DecodeParams,
    quiet: bool,
) -> Result<DecodeReport> {
    info!("Decoding {}", file.display());

    // === Dependency Injection ===
    let source = Arc::new(JsonlRecordSource::new(PathBuf::from(file)));
    let mut use_case = DecodeBatchUseCase::new(source).with_params(params);
    if let Some(path) = write {
        let sink = JsonlDetailSink::create(path)
            .with_context(|| format!("Cannot create output file {}", path.display()))?;
        use_case = use_case.with_sink(Arc::new(sink));
    }

    let report = if quiet {
        use_case.execute().await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(&progress).await?
    };
    Ok(report)
}
