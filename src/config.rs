use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Log {
    #[serde(default)]
    pub level: LogLevel,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, Default, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            timeout_secs: 15,
            connect_timeout_secs: 5,
            user_agent: format!("webcite/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ResolverConfig {
    /// When both are present, og:title is used instead of the <title> element
    pub prefer_og_title: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            prefer_og_title: true,
        }
    }
}

/// Custom mustache templates replacing the built-in ones
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct Templates {
    pub bibtex: Option<PathBuf>,
    pub biblatex: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
pub struct Config {
    pub log: Option<Log>,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub templates: Templates,
}

fn parse_path(path: PathBuf) -> PathBuf {
    if !path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    match (exe_dir, path.to_str()) {
        (Some(exe_dir), Some(str_path)) => {
            PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy()))
        }
        _ => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.templates = Templates {
        bibtex: cfg.templates.bibtex.map(parse_path),
        biblatex: cfg.templates.biblatex.map(parse_path),
    };
    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(parse_path);
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
