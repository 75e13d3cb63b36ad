//! setup-xcode
//!
//! CI step that finds installed Xcode versions, picks the one matching the
//! requested version spec and makes it the active developer directory.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use setup_xcode_cli::output::{format_count, Status};
use setup_xcode_core::config::{Config, XcodeConfig};
use setup_xcode_core::error::{exit_codes, Error as CoreError, ErrorReport};
use setup_xcode_core::pipeline::{running_in_ci, Pipeline};
use setup_xcode_telemetry::{TelemetryConfig, Timer};
use setup_xcode_toolchain::{
    platform, resolve, Activator, SkipReason, VersionCatalog, VersionRecord, XcodeError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tabled::{Table, Tabled};

#[derive(Parser)]
#[command(name = "setup-xcode")]
#[command(about = "Select an installed Xcode version for the current CI job")]
#[command(version)]
#[command(author)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, env = "SETUP_XCODE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory scanned for Xcode*.app bundles (default: /Applications)
    #[arg(long, global = true, env = "SETUP_XCODE_APPLICATIONS_DIR")]
    applications_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a version spec and switch the active Xcode to it
    Select {
        /// latest, latest-stable, a semver range, or a range with a -beta suffix
        #[arg(long = "xcode-version", env = "INPUT_XCODE-VERSION")]
        xcode_version: String,
    },

    /// List installed Xcode versions, newest first
    List,

    /// Show which installation a version spec resolves to, without switching
    Resolve {
        /// Version spec to resolve
        spec: String,
    },
}

/// Effective settings after merging CLI flags over the config file
struct Settings {
    xcode: XcodeConfig,
    format: Format,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = cli.format;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = e.to_string();
            if running_in_ci() {
                Pipeline::from_env().error(&message);
            } else {
                Status::error(&message);
            }
            if format == Format::Json {
                if let Some(report) = error_report(&e) {
                    if let Ok(json) = serde_json::to_string_pretty(&report) {
                        println!("{}", json);
                    }
                }
            }
            ExitCode::from(exit_code_for(&e) as u8)
        }
    }
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<XcodeError>() {
        e.exit_code()
    } else if let Some(e) = err.downcast_ref::<CoreError>() {
        e.exit_code()
    } else {
        exit_codes::FAILURE
    }
}

fn error_report(err: &anyhow::Error) -> Option<ErrorReport> {
    if let Some(e) = err.downcast_ref::<XcodeError>() {
        Some(e.to_report())
    } else {
        err.downcast_ref::<CoreError>().map(CoreError::to_report)
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let telemetry = TelemetryConfig {
        log_level: config.schema.logging.level.clone(),
        json: config.schema.logging.json,
        ansi: !config.schema.logging.json,
        ..TelemetryConfig::default()
    }
    .with_verbosity(cli.verbose);
    if let Err(e) = setup_xcode_telemetry::init_with_config(telemetry) {
        Status::warning(&e.to_string());
    }

    let mut xcode = config.schema.xcode;
    if let Some(dir) = cli.applications_dir {
        xcode.applications_dir = dir;
    }
    let settings = Settings {
        xcode,
        format: cli.format,
    };

    match cli.command {
        Commands::Select { xcode_version } => cmd_select(&settings, &xcode_version)?,
        Commands::List => cmd_list(&settings)?,
        Commands::Resolve { spec } => cmd_resolve(&settings, &spec)?,
    }

    Ok(())
}

fn build_catalog(settings: &Settings) -> Result<VersionCatalog, XcodeError> {
    let timer = Timer::start("build_catalog");
    let catalog = VersionCatalog::build(&settings.xcode.applications_dir)?;
    timer.stop();
    Ok(catalog)
}

/// Resolve `spec`, distinguishing "nothing installed" from "nothing matches"
fn find<'a>(
    settings: &Settings,
    catalog: &'a VersionCatalog,
    spec: &str,
) -> Result<&'a VersionRecord, XcodeError> {
    if catalog.is_empty() {
        return Err(XcodeError::NoInstallations {
            spec: spec.to_string(),
            dir: settings.xcode.applications_dir.clone(),
        });
    }
    resolve(catalog, spec).ok_or_else(|| XcodeError::VersionNotFound(spec.to_string()))
}

fn cmd_select(settings: &Settings, spec: &str) -> Result<()> {
    platform::ensure_macos()?;
    let pipeline = Pipeline::from_env();

    let catalog = build_catalog(settings)?;
    if running_in_ci() {
        for skipped in catalog.skipped() {
            if !matches!(skipped.reason, SkipReason::MissingFile(_)) {
                pipeline.warning(&format!(
                    "Ignoring {}: {}",
                    skipped.path.display(),
                    skipped.reason
                ));
            }
        }
    }

    let record = match find(settings, &catalog, spec) {
        Ok(record) => record,
        Err(e) => {
            if !catalog.is_empty() && prints_status(settings.format) {
                pipeline.group("Available versions");
                println!("{}", versions_table(&catalog));
                pipeline.end_group();
            }
            return Err(e.into());
        }
    };

    if prints_status(settings.format) {
        Status::info(&format!("Switching Xcode to version '{}'...", record.version()));
    }
    let activation = Activator::from_config(&settings.xcode).activate(record)?;

    let (name, value) = &activation.export;
    pipeline.export_variable(name, value)?;
    pipeline.set_output("version", &record.version().to_string())?;
    pipeline.set_output("path", &record.path().display().to_string())?;

    if settings.format == Format::Json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        Status::success(&format!(
            "Xcode {} is now active at {}",
            record,
            activation.path.display()
        ));
    }
    Ok(())
}

/// Progress lines and tables stay off stdout in JSON mode
fn prints_status(format: Format) -> bool {
    format == Format::Text
}

fn cmd_list(settings: &Settings) -> Result<()> {
    let catalog = build_catalog(settings)?;

    if settings.format == Format::Json {
        let skipped: Vec<_> = catalog
            .skipped()
            .iter()
            .map(|s| {
                serde_json::json!({
                    "path": s.path,
                    "reason": s.reason.to_string(),
                })
            })
            .collect();
        let json = serde_json::json!({
            "applications_dir": settings.xcode.applications_dir,
            "versions": catalog.records(),
            "skipped": skipped,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    Status::header(&format!(
        "Installed Xcode versions in {}",
        settings.xcode.applications_dir.display()
    ));
    if catalog.is_empty() {
        Status::warning("No Xcode installations found");
    } else {
        println!("{}", versions_table(&catalog));
        println!("{}", format_count(catalog.len(), "installation", "installations"));
    }

    for skipped in catalog.skipped() {
        Status::warning(&format!(
            "Skipped {}: {}",
            skipped.path.display(),
            skipped.reason
        ));
    }
    Ok(())
}

fn cmd_resolve(settings: &Settings, spec: &str) -> Result<()> {
    let catalog = build_catalog(settings)?;
    let record = find(settings, &catalog, spec)?;

    if settings.format == Format::Json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{}\t{}", record.version(), record.path().display());
    }
    Ok(())
}

#[derive(Tabled)]
struct VersionRow {
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Build")]
    build: String,
    #[tabled(rename = "Release")]
    release: String,
    #[tabled(rename = "Path")]
    path: String,
}

fn versions_table(catalog: &VersionCatalog) -> Table {
    let rows = catalog.iter().map(|r| VersionRow {
        version: r.version().to_string(),
        build: r.build_number().unwrap_or("-").to_string(),
        release: r.release_type().to_string(),
        path: r.path().display().to_string(),
    });
    Table::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;
    use setup_xcode_toolchain::ReleaseType;

    #[test]
    fn test_versions_table_rows() {
        let catalog = VersionCatalog::from_records(vec![
            VersionRecord::new(
                Version::new(14, 3, 1),
                Some("14E300c".to_string()),
                ReleaseType::Gm,
                "/Applications/Xcode_14.3.1.app",
            ),
            VersionRecord::new(
                Version::new(15, 1, 0),
                None,
                ReleaseType::Beta,
                "/Applications/Xcode-beta.app",
            ),
        ]);
        let table = versions_table(&catalog).to_string();
        let lines: Vec<&str> = table.lines().collect();

        let header = lines.iter().position(|l| l.contains("Version")).unwrap();
        let beta = lines.iter().position(|l| l.contains("Xcode-beta.app")).unwrap();
        let gm = lines.iter().position(|l| l.contains("14E300c")).unwrap();
        assert!(header < beta && beta < gm);
        for column in ["Build", "Release", "Path"] {
            assert!(lines[header].contains(column));
        }
        assert!(lines[beta].contains("Beta"));
    }

    #[test]
    fn test_status_output_is_text_only() {
        assert!(prints_status(Format::Text));
        assert!(!prints_status(Format::Json));
    }
}
