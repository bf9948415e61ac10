use std::borrow::Cow;
use std::fs;
use std::path::Path;

use ramhorns::Template;
use spdlog::debug;

use crate::config::Templates;
use crate::reference::ResolvedReference;
use crate::view::{Dialect, RenderError};

// Values are not escaped. A double quote in a title ends the field early.
const BIBTEX_TEMPLATE: &str = r#"@misc{ {{{slug}}},
  author = "{{{author}}}",
  title = "{{{title}}}",
  year = "{{{year}}}",
  month = "{{{month}}}",
  howpublished = "\url{ {{{url}}} }",
  note = "[En ligne, accédée le {{{today}}}]"
}"#;

const BIBLATEX_TEMPLATE: &str = r#"@online{ {{{slug}}},
  author = "{{{author}}}",
  title = "{{{title}}}",
  year = "{{{year}}}",
  month = "{{{month}}}",
  url = "{{{url}}}",
  note = "[En ligne, accédée le {{{today}}}]"
}"#;

#[derive(ramhorns::Content)]
struct ReferenceView<'a> {
    slug: &'a str,
    author: &'a str,
    title: &'a str,
    year: &'a str,
    month: &'a str,
    url: &'a str,
    today: &'a str,
}

impl<'a> From<&'a ResolvedReference> for ReferenceView<'a> {
    fn from(reference: &'a ResolvedReference) -> Self {
        ReferenceView {
            slug: &reference.slug,
            author: &reference.author,
            title: &reference.title,
            year: &reference.year,
            month: &reference.month,
            url: &reference.url,
            today: &reference.today,
        }
    }
}

pub struct ReferenceRenderer<'a> {
    bibtex: Template<'a>,
    biblatex: Template<'a>,
}

impl ReferenceRenderer<'static> {
    /// Renderer using the built-in templates
    pub fn new() -> Result<Self, RenderError> {
        Self::from_config(&Templates::default())
    }

    pub fn from_config(templates: &Templates) -> Result<Self, RenderError> {
        Ok(ReferenceRenderer {
            bibtex: load_template(Dialect::Bibtex, templates.bibtex.as_deref())?,
            biblatex: load_template(Dialect::Biblatex, templates.biblatex.as_deref())?,
        })
    }
}

impl ReferenceRenderer<'_> {
    pub fn render(&self, reference: &ResolvedReference, dialect: Dialect) -> String {
        let template = match dialect {
            Dialect::Bibtex => &self.bibtex,
            Dialect::Biblatex => &self.biblatex,
        };
        template.render(&ReferenceView::from(reference))
    }

    /// Renders with a dialect given by name, `bibtex` or `biblatex`
    pub fn render_named(&self, reference: &ResolvedReference, dialect: &str) -> Result<String, RenderError> {
        let dialect: Dialect = dialect.parse()?;
        Ok(self.render(reference, dialect))
    }
}

fn builtin_template(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Bibtex => BIBTEX_TEMPLATE,
        Dialect::Biblatex => BIBLATEX_TEMPLATE,
    }
}

fn load_template(dialect: Dialect, path: Option<&Path>) -> Result<Template<'static>, RenderError> {
    let source: Cow<'static, str> = match path {
        None => Cow::Borrowed(builtin_template(dialect)),
        Some(path) => {
            debug!("Loading {} template from {}", dialect, path.display());
            let content = fs::read_to_string(path).map_err(|source| RenderError::TemplateFile {
                dialect,
                path: path.to_path_buf(),
                source,
            })?;
            Cow::Owned(content)
        }
    };

    Template::new(source).map_err(|e| RenderError::Template {
        dialect,
        message: e.to_string(),
    })
}
