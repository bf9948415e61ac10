use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use std::io;

use thiserror::Error;

pub mod reference_renderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown dialect {0:?}, expected bibtex or biblatex")]
    UnknownDialect(String),
    #[error("unable to read {dialect} template {path:?}: {source}")]
    TemplateFile {
        dialect: Dialect,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error parsing {dialect} template: {message}")]
    Template {
        dialect: Dialect,
        message: String,
    },
}

/// Citation formats a reference can be rendered to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dialect {
    /// `@misc` entry, url in `howpublished`
    Bibtex,
    /// `@online` entry with a `url` field
    Biblatex,
}

impl Dialect {
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Bibtex => "bibtex",
            Dialect::Biblatex => "biblatex",
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Dialect {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bibtex" => Ok(Dialect::Bibtex),
            "biblatex" => Ok(Dialect::Biblatex),
            _ => Err(RenderError::UnknownDialect(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dialect() {
        assert_eq!("bibtex".parse::<Dialect>().unwrap(), Dialect::Bibtex);
        assert_eq!("BibLaTeX".parse::<Dialect>().unwrap(), Dialect::Biblatex);

        let err = "apa".parse::<Dialect>().err().unwrap();
        assert_eq!(err.to_string(), "unknown dialect \"apa\", expected bibtex or biblatex");
    }
}
