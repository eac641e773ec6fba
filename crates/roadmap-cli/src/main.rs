use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eyre::Result;
use roadmap_cli::commands;
use roadmap_cli::config::{self, RoadmapConfig};

#[derive(Parser)]
#[command(name = "roadmap")]
#[command(version)]
#[command(about = "Generate brain-health roadmaps from labs and questionnaire answers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a roadmap from request JSON
    Render {
        /// Request JSON file, or '-' for stdin
        request: PathBuf,

        /// Write the roadmap here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the full output (text, diagnostics, risk profile) as JSON
        #[arg(long)]
        report: Option<PathBuf>,

        /// Report date (YYYY-MM-DD), overriding the request
        #[arg(long)]
        report_date: Option<String>,

        /// Exit non-zero when any warning diagnostic was produced
        #[arg(long)]
        strict: bool,
    },

    /// Parse a template and list the rules and placeholders it references
    CheckTemplate {
        /// Template file; the active template when omitted
        template: Option<PathBuf>,
    },

    /// Compute the risk profile of questionnaire answers
    Risk {
        /// Answers JSON file, or '-' for stdin
        answers: PathBuf,

        /// Number of ranked axes to list
        #[arg(long, default_value = "3")]
        top: usize,
    },

    /// Print the active rule catalog as JSON
    Catalog,

    /// Write a default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))
    }
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, contents)
            .map_err(|e| eyre::eyre!("failed to write {}: {e}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Commands::InitConfig { force } = cli.command {
        init_tracing(cli.json_logs);
        let path = match cli.config {
            Some(path) => path,
            None => config::default_config_path()?,
        };
        if path.exists() && !force {
            return Err(eyre::eyre!(
                "{} already exists (use --force to overwrite)",
                path.display()
            ));
        }
        config::save_config(&path, &RoadmapConfig::default())?;
        eprintln!("wrote {}", path.display());
        return Ok(());
    }

    let (cfg, cfg_path) = config::load_or_default(cli.config.as_deref())?;
    init_tracing(cli.json_logs || cfg.json_logs);

    let base = cfg_path.as_deref().and_then(Path::parent);

    match cli.command {
        Commands::Render {
            request,
            output,
            report,
            report_date,
            strict,
        } => {
            let registries = cfg.load_registries(base)?;
            let request = read_input(&request)?;
            let out = commands::render(
                registries,
                cfg.top_risk_count,
                &request,
                report_date.as_deref(),
            )?;

            for diagnostic in out.diagnostics.iter() {
                eprintln!("{diagnostic}");
            }
            write_output(output.as_deref(), &out.text)?;
            if let Some(report) = report {
                write_output(Some(report.as_path()), &serde_json::to_string_pretty(&out)?)?;
            }

            let warnings = out.diagnostics.warnings().count();
            if strict && warnings > 0 {
                return Err(eyre::eyre!("{warnings} warning diagnostic(s) produced"));
            }
        }
        Commands::CheckTemplate { template } => {
            let registries = cfg.load_registries(base)?;
            let source = match template {
                Some(path) => read_input(&path)?,
                None => match &cfg.template_path {
                    Some(path) => read_input(&config::resolve_path(path, base))?,
                    None => roadmap_engine::registries::BUILTIN_TEMPLATE.to_string(),
                },
            };
            let report = commands::check_template(&registries, &source)?;
            write_output(None, &format!("{}\n", serde_json::to_string_pretty(&report)?))?;
            if !report.is_clean() {
                return Err(eyre::eyre!(
                    "{} region(s) name unknown rules",
                    report.unknown_rules.len()
                ));
            }
        }
        Commands::Risk { answers, top } => {
            let registries = cfg.load_registries(base)?;
            let answers = read_input(&answers)?;
            let report = commands::risk(&registries, &answers, top)?;
            write_output(None, &format!("{}\n", serde_json::to_string_pretty(&report)?))?;
        }
        Commands::Catalog => {
            let registries = cfg.load_registries(base)?;
            write_output(None, &format!("{}\n", commands::catalog(&registries)?))?;
        }
        Commands::InitConfig { .. } => {}
    }

    Ok(())
}
