use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::{configure, filter};
use site_search_core::config;
use site_search_core::config::AppConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout carries results; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Filter { sites, query, json } => {
            run_filter(&cfg, sites.as_deref(), query.as_deref(), json)
        }
        Commands::Settings { command } => run_settings(&cfg, command),
    }
}

#[derive(Parser)]
#[command(name = "site-search")]
#[command(about = "Filter site listings by title and manage module settings", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a JSON site list by title
    Filter {
        /// JSON file with an array of site objects (overrides sites.path)
        #[arg(long)]
        sites: Option<String>,
        /// Case-insensitive title search; omit to list every site
        #[arg(short, long)]
        query: Option<String>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or update module settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print effective settings
    Show {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// List configuration form fields
    Fields,
    /// Normalize and validate a form submission
    Apply {
        /// Field assignment, e.g. moduletemplate_demo_number=750
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

fn run_filter(cfg: &AppConfig, sites: Option<&str>, query: Option<&str>, json: bool) -> Result<()> {
    let report = filter::run_filter(cfg, sites, query)?;
    println!("{}", filter::render(&report, json)?);
    Ok(())
}

fn run_settings(cfg: &AppConfig, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show { json } => {
            println!("{}", configure::render_settings(&cfg.settings, json)?);
        }
        SettingsCommand::Fields => {
            for line in configure::describe_fields() {
                println!("{line}");
            }
        }
        SettingsCommand::Apply { set, json } => {
            let overrides = configure::parse_assignments(&set)?;
            let next = configure::apply_overrides(&cfg.settings, overrides)?;
            println!("{}", configure::render_settings(&next, json)?);
        }
    }
    Ok(())
}
