//! Sharn CLI - render, scaffold and check district description files

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use sharn_core::model::{DistrictEntry, LevelEntry};
use sharn_core::prelude::*;
use sharn_core::resolve::district_entry;
use sharn_core::{scaffold, validate};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "sharn")]
#[command(about = "District descriptions for the Sharn atlas", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// The info panel exactly as the map shows it
    Html,
    /// A plain outline of the dataset text
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the info panel for one district
    Show {
        /// District identifier, e.g. C3 or grayflood
        district: String,

        /// Dataset file or URL
        #[arg(short, long, default_value = DEFAULT_DATASET)]
        data: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },

    /// Write an empty description file covering every district on the map
    Scaffold {
        /// Output file
        #[arg(short, long, default_value = DEFAULT_DATASET)]
        output: PathBuf,

        /// Overwrite the file if it already exists
        #[arg(long)]
        force: bool,
    },

    /// Check that districts in a dataset can be rendered
    Check {
        /// Dataset file or URL
        #[arg(short, long, default_value = DEFAULT_DATASET)]
        data: String,

        /// Districts to check (default: every district in the dataset)
        districts: Vec<String>,

        /// Check every district on the standard map, present or not
        #[arg(long, conflicts_with = "districts")]
        standard_map: bool,

        /// Report blank names and descriptions without failing
        #[arg(long)]
        allow_blank: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so rendered output can be piped
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            district,
            data,
            format,
        } => {
            run_show(&district, &data, format).await?;
        }
        Commands::Scaffold { output, force } => {
            run_scaffold(&output, force)?;
        }
        Commands::Check {
            data,
            districts,
            standard_map,
            allow_blank,
        } => {
            let ids = if standard_map {
                scaffold::district_ids()
            } else {
                districts
            };
            run_check(&data, &ids, allow_blank).await?;
        }
    }

    Ok(())
}

async fn load_store(data: &str) -> Result<DescriptionStore> {
    let fetcher = SourceFetcher::new();
    let text = fetcher.fetch_text(data).await?;

    let mut store = DescriptionStore::new();
    store
        .load_from_text(&text, DatasetSource::Url(data.to_string()))
        .with_context(|| format!("Could not read dataset {data}"))?;
    Ok(store)
}

async fn run_show(district: &str, data: &str, format: Format) -> Result<()> {
    let store = load_store(data).await?;
    let renderer = Renderer::new();

    let view = resolve(district, &store, renderer.text())
        .with_context(|| format!("Cannot show district {district}"))?;

    match format {
        Format::Html => {
            let mut panel = renderer.help_panel();
            renderer.render(&mut panel, &view);
            println!("{}", panel.to_html());
        }
        Format::Text => {
            let entry = district_entry(district, &store)?;
            print!("{}", outline(&view, &entry));
        }
    }

    Ok(())
}

/// Plain-text outline of a district using the dataset's own markdown
fn outline(view: &ResolvedView, entry: &DistrictEntry) -> String {
    let records: Vec<&LevelEntry> = match entry {
        DistrictEntry::Cliffside(level) => vec![level],
        DistrictEntry::Tiered(tiered) => vec![&tiered.upper, &tiered.middle, &tiered.lower],
    };

    let mut out = format!("{} ({})\n", view.ward_name, view.district_id);
    for (level, record) in view.levels.iter().zip(records) {
        out.push_str(&format!("\n{}\n", level.label));
        for line in record.description.lines().filter(|l| !l.trim().is_empty()) {
            out.push_str(&format!("  {}\n", line.trim()));
        }
        for (name, description) in record.notable_locations.pairs() {
            out.push_str(&format!("  - {name}: {description}\n"));
        }
    }
    out
}

fn run_scaffold(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        warn!(
            "{} already exists; pass --force to overwrite it",
            output.display()
        );
        return Ok(());
    }

    let json = serde_json::to_string_pretty(&scaffold::boilerplate())?;
    std::fs::write(output, json + "\n")
        .with_context(|| format!("Could not write {}", output.display()))?;

    info!(
        "Wrote {} districts to {}",
        scaffold::district_ids().len(),
        output.display()
    );
    Ok(())
}

async fn run_check(data: &str, ids: &[String], allow_blank: bool) -> Result<()> {
    let store = load_store(data).await?;
    let report = validate::check(&store, ids, &MarkdownSanitizer::new());

    for issue in &report.issues {
        println!("  {issue}");
    }
    info!(
        "Checked {} districts in {}: {} issue(s)",
        report.checked,
        data,
        report.issues.len()
    );

    if !report.is_renderable() {
        bail!("Some districts cannot be rendered");
    }
    if !allow_blank && !report.is_clean() {
        bail!("Some names or descriptions are still blank");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Log sink shared between the subscriber and the test
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with logs captured as plain text
    fn logs_of(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap()
    }

    const DATA: &str = r#"{
        "cliffside": { "name": "Cliffside", "description": "" },
        "X9": {
            "name": "Greyhollow",
            "description": "Fog.\n\nMore fog.",
            "notableLocations": { "name": ["Lamp"], "description": ["Lit"] }
        }
    }"#;

    #[test]
    fn test_outline_lists_locations() {
        let mut store = DescriptionStore::new();
        store.load_from_text(DATA, DatasetSource::Default).unwrap();
        let view = resolve("X9", &store, &MarkdownSanitizer::new()).unwrap();
        let entry = district_entry("X9", &store).unwrap();

        let text = outline(&view, &entry);
        assert!(text.starts_with("Cliffside (X9)\n"));
        assert!(text.contains("\nGreyhollow\n  Fog.\n  More fog.\n"));
        assert!(text.contains("  - Lamp: Lit\n"));
    }

    #[test]
    fn test_scaffold_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("districtInfo.json");
        std::fs::write(&path, "{}").unwrap();

        run_scaffold(&path, false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        run_scaffold(&path, true).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"sharnsWelcome\""));
    }

    #[test]
    fn test_scaffold_logs_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("districtInfo.json");

        let logs = logs_of(|| run_scaffold(&path, false).unwrap());
        let expected = format!("Wrote {} districts", scaffold::district_ids().len());
        assert!(logs.contains("INFO"), "{logs}");
        assert!(logs.contains(&expected), "{logs}");

        let logs = logs_of(|| run_scaffold(&path, false).unwrap());
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("already exists"), "{logs}");
    }

    #[tokio::test]
    async fn test_check_fails_on_unrenderable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{ "C1": { "upper": {} } }"#).unwrap();

        let result = run_check(path.to_str().unwrap(), &[], true).await;
        assert!(result.is_err());
    }
}
