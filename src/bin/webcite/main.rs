use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use spdlog::{debug, info, warn};

use webcite::config::Config;
use webcite::fetch::Fetcher;
use webcite::logger::configure_logger;
use webcite::meta::meta_scanner::scan;
use webcite::reference::resolve;
use webcite::view::reference_renderer::ReferenceRenderer;
use webcite::view::Dialect;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "webcite.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("dialect").required(true).args(["bibtex", "biblatex"])))]
struct Args {
    /// The url of the page to get the information of
    #[arg(short, long)]
    url: String,

    /// Generate a bibtex reference
    #[arg(long)]
    bibtex: bool,

    /// Generate a biblatex reference
    #[arg(long)]
    biblatex: bool,

    /// Path of the webcite.toml configuration file
    #[arg(short, long)]
    config: Option<String>,
}

impl Args {
    fn dialect(&self) -> Dialect {
        if self.bibtex {
            Dialect::Bibtex
        } else {
            Dialect::Biblatex
        }
    }
}

fn generate_reference(url: &str, dialect: Dialect, config: &Config) -> Result<String> {
    // Broken custom templates should fail before any download
    let renderer = ReferenceRenderer::from_config(&config.templates)?;
    let fetcher = Fetcher::new(&config.fetch);

    info!("Fetching {}", url);
    let page = fetcher.open(url)?;
    let meta = scan(page);
    debug!("Metadata of {}: {:?}", url, meta);

    let reference = resolve(&meta, url, &config.resolver)
        .with_context(|| format!("error while trying to generate the reference of page {}", url))?;

    Ok(renderer.render(&reference, dialect))
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config_path = args.config.as_ref().map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run webcite --help");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using default logger instead. Desc={}", err);
    }

    let res = generate_reference(&args.url, args.dialect(), &config);
    spdlog::default_logger().flush();

    match res {
        Ok(reference) => {
            println!("{}", reference);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
