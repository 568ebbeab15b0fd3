use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use router_check::output::export_to_file;
use router_check::{
    DataKey, FieldDictionary, FileSource, Report, RouterSource, Section, SectionMap, Settings,
    StatusSource,
};

#[derive(Parser, Debug)]
#[command(name = "router-check", version)]
#[command(about = "Return router xDSL status, either plain text or for RRDTool")]
struct Args {
    /// Print the plain text from one or more sections (default: port)
    #[arg(
        long,
        num_args = 1..,
        value_name = "SECTION",
        value_parser = section_parser(),
        conflicts_with_all = ["data", "export"]
    )]
    text: Option<Vec<Section>>,

    /// Parse values from the port section, printed separated by colons
    #[arg(
        long,
        num_args = 1..,
        value_name = "KEY",
        value_parser = data_key_parser(),
        conflicts_with_all = ["text", "export"]
    )]
    data: Option<Vec<DataKey>>,

    /// Export the sections and port table to a JSON file and exit
    #[arg(short, long, conflicts_with_all = ["text", "data"])]
    export: Option<PathBuf>,

    /// Read a saved statistics page or status dump instead of the router
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Config file with a [router] table
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Router address (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Login name (overrides config)
    #[arg(short, long)]
    username: Option<String>,

    /// Login password (overrides config)
    #[arg(short, long)]
    password: Option<String>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// The report to print; plain port text when no mode was given.
    fn report(&self) -> Report {
        match (&self.text, &self.data) {
            (_, Some(keys)) => Report::Data(keys.clone()),
            (Some(sections), None) => Report::Text(sections.clone()),
            (None, None) => Report::Text(vec![Section::Port]),
        }
    }
}

fn section_parser() -> impl TypedValueParser<Value = Section> {
    PossibleValuesParser::new(Section::ALL.map(|section| section.name()))
        .try_map(|name| name.parse::<Section>())
}

/// Data keys are limited to the field dictionary's `_up`/`_down` choices.
fn data_key_parser() -> impl TypedValueParser<Value = DataKey> {
    PossibleValuesParser::new(FieldDictionary::standard().choices())
        .try_map(|key| key.parse::<DataKey>())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let settings = load_settings(&args)?;

    let source: Box<dyn StatusSource> = match &args.file {
        Some(path) => Box::new(FileSource::new(path, &settings.router.status_element_id)),
        None => Box::new(RouterSource::from_settings(&settings.router)?),
    };

    // One request-response cycle; the runtime only drives it to completion
    let rt = tokio::runtime::Runtime::new()?;
    let text = rt
        .block_on(source.fetch())
        .with_context(|| format!("Failed to read status from {}", source.description()))?;
    info!(bytes = text.len(), source = source.description(), "Fetched status text");

    let sections = SectionMap::split(&text)?;
    debug!(
        header = sections.header.len(),
        port = sections.port.len(),
        counters = sections.counters.len(),
        "Split status text"
    );

    if let Some(export_path) = &args.export {
        export_to_file(&sections, export_path)?;
        println!("Exported router status to: {}", export_path.display());
        return Ok(());
    }

    let report = args.report();
    info!(?report, "Rendering");
    let out = report.render(&sections)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(out.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Log to stderr so stdout stays clean for the data record.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Config file and environment, then command-line overrides.
fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::load(args.config.as_deref())?;

    if let Some(host) = &args.host {
        settings.router.host = host.clone();
    }
    if let Some(username) = &args.username {
        settings.router.username = username.clone();
    }
    if let Some(password) = &args.password {
        settings.router.password = password.clone();
    }

    debug!(
        host = %settings.router.host,
        user = %settings.router.username,
        timeout = ?settings.router.timeout,
        "Loaded settings"
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use router_check::Direction;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("router-check").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_default_is_port_text() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.report(), Report::Text(vec![Section::Port]));
    }

    #[test]
    fn test_text_sections_in_order() {
        let args = parse(&["--text", "counters", "header"]).unwrap();
        assert_eq!(
            args.report(),
            Report::Text(vec![Section::Counters, Section::Header])
        );
    }

    #[test]
    fn test_data_keys() {
        let args = parse(&["--data", "actual_up", "snr_down"]).unwrap();
        assert_eq!(
            args.report(),
            Report::Data(vec![
                DataKey::new("actual", Direction::Upstream),
                DataKey::new("snr", Direction::Downstream),
            ])
        );
    }

    #[test]
    fn test_data_rejects_unknown_key() {
        assert!(parse(&["--data", "bogus_up"]).is_err());
        assert!(parse(&["--data", "actual"]).is_err());
    }

    #[test]
    fn test_modes_are_exclusive() {
        assert!(parse(&["--text", "port", "--data", "actual_up"]).is_err());
        assert!(parse(&["--export", "out.json", "--data", "actual_up"]).is_err());
    }

    #[test]
    fn test_every_section_name_accepted() {
        let args = parse(&["--text", "header", "port", "counters"]).unwrap();
        assert_eq!(args.report(), Report::Text(Section::ALL.to_vec()));
    }

    #[test]
    fn test_unknown_section() {
        assert!(parse(&["--text", "footer"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let args = parse(&["--host", "10.0.0.1", "-u", "root", "-p", "pw"]).unwrap();
        let settings = load_settings(&args).unwrap();
        assert_eq!(settings.router.host, "10.0.0.1");
        assert_eq!(settings.router.username, "root");
        assert_eq!(settings.router.password, "pw");
    }
}
