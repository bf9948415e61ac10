use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate};
use spdlog::debug;
use thiserror::Error;

use crate::config::ResolverConfig;
use crate::meta::RawMeta;
use crate::text_utils::{format_day, french_month, parse_date_time, slugify};

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("unable to parse date {value:?}: {source}")]
    DateParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Values of a citation, ready to be rendered
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedReference {
    pub slug: String,
    pub author: String,
    pub title: String,
    pub year: String,
    pub month: String,
    pub url: String,
    pub today: String,
}

/// Year and month always travel together
#[derive(Debug, Clone, Copy, PartialEq)]
struct PublicationMonth {
    year: i32,
    month: u32,
}

impl PublicationMonth {
    fn from_date_time(date_time: &DateTime<FixedOffset>) -> Self {
        PublicationMonth {
            year: date_time.year(),
            month: date_time.month(),
        }
    }

    /// e.g. 2023-04
    fn slug_prefix(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Returns the first candidate that is not empty, in priority order.
pub fn first_non_empty<'a>(candidates: &[&'a str]) -> &'a str {
    candidates.iter()
        .copied()
        .find(|c| !c.is_empty())
        .unwrap_or("")
}

fn title_candidates<'a>(meta: &'a RawMeta, config: &ResolverConfig) -> [&'a str; 2] {
    if config.prefer_og_title {
        [meta.og_title.as_str(), meta.title.as_str()]
    } else {
        [meta.title.as_str(), meta.og_title.as_str()]
    }
}

fn author_candidates(meta: &RawMeta) -> [&str; 2] {
    [meta.author.as_str(), meta.article_author.as_str()]
}

fn date_candidates(meta: &RawMeta) -> [&str; 3] {
    [
        meta.article_published_time.as_str(),
        meta.og_updated_time.as_str(),
        meta.article_modified_time.as_str(),
    ]
}

fn resolve_date(date: &str) -> Result<Option<PublicationMonth>, ReferenceError> {
    if date.is_empty() {
        return Ok(None);
    }

    match parse_date_time(date) {
        Ok(date_time) => Ok(Some(PublicationMonth::from_date_time(&date_time))),
        Err(source) => Err(ReferenceError::DateParse {
            value: date.to_string(),
            source,
        }),
    }
}

fn reference_slug(title: &str, publication: Option<&PublicationMonth>) -> String {
    let title_slug = slugify(title);
    match publication {
        None => title_slug,
        Some(publication) if title_slug.is_empty() => publication.slug_prefix(),
        Some(publication) => format!("{}-{}", publication.slug_prefix(), title_slug),
    }
}

pub fn resolve(meta: &RawMeta, url: &str, config: &ResolverConfig) -> Result<ResolvedReference, ReferenceError> {
    resolve_at(meta, url, config, Local::now().date_naive())
}

/// Same as [resolve], with the day of access given by the caller.
pub fn resolve_at(meta: &RawMeta, url: &str, config: &ResolverConfig, today: NaiveDate) -> Result<ResolvedReference, ReferenceError> {
    let title = first_non_empty(&title_candidates(meta, config));
    let author = first_non_empty(&author_candidates(meta));
    let date = first_non_empty(&date_candidates(meta));

    let publication = resolve_date(date)?;
    let slug = reference_slug(title, publication.as_ref());
    debug!("Resolved url={} slug={} date={:?}", url, slug, date);

    let (year, month) = match publication {
        Some(publication) => (format!("{:04}", publication.year), french_month(publication.month).to_string()),
        None => (String::new(), String::new()),
    };

    Ok(ResolvedReference {
        slug,
        author: author.to_string(),
        title: title.to_string(),
        year,
        month,
        url: url.to_string(),
        today: format_day(&today),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 04, 05).unwrap()
    }

    fn resolve_default(meta: &RawMeta) -> Result<ResolvedReference, ReferenceError> {
        resolve_at(meta, "https://example.com/a", &ResolverConfig::default(), today())
    }

    #[test]
    fn test_first_non_empty() {
        assert_eq!(first_non_empty(&["", "b", "c"]), "b");
        assert_eq!(first_non_empty(&["a", "b"]), "a");
        assert_eq!(first_non_empty(&["", ""]), "");
        assert_eq!(first_non_empty(&[]), "");
    }

    #[test]
    fn test_resolve_title_and_date() {
        let meta = RawMeta {
            title: "Les Misérables".to_string(),
            article_published_time: "2023-04-05T10:00:00+02:00".to_string(),
            ..Default::default()
        };
        let reference = resolve_default(&meta).unwrap();
        assert_eq!(reference, ResolvedReference {
            slug: "2023-04-les-miserables".to_string(),
            author: "".to_string(),
            title: "Les Misérables".to_string(),
            year: "2023".to_string(),
            month: "Avril".to_string(),
            url: "https://example.com/a".to_string(),
            today: "05 Avril 2023".to_string(),
        });
    }

    #[test]
    fn test_empty_meta() {
        let reference = resolve_default(&RawMeta::default()).unwrap();
        assert_eq!(reference.slug, "");
        assert_eq!(reference.title, "");
        assert_eq!(reference.author, "");
        assert_eq!(reference.year, "");
        assert_eq!(reference.month, "");
        assert_eq!(reference.today, "05 Avril 2023");
    }

    #[test]
    fn test_author_priority() {
        let mut meta = RawMeta {
            author: "Victor Hugo".to_string(),
            article_author: "https://example.com/vhugo".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_default(&meta).unwrap().author, "Victor Hugo");

        meta.author.clear();
        assert_eq!(resolve_default(&meta).unwrap().author, "https://example.com/vhugo");
    }

    #[test]
    fn test_title_priority() {
        let meta = RawMeta {
            title: "Element title".to_string(),
            og_title: "Open Graph title".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_default(&meta).unwrap().title, "Open Graph title");

        let config = ResolverConfig { prefer_og_title: false };
        let reference = resolve_at(&meta, "u", &config, today()).unwrap();
        assert_eq!(reference.title, "Element title");
        assert_eq!(reference.slug, "element-title");

        let meta = RawMeta {
            og_title: "Only Open Graph".to_string(),
            ..Default::default()
        };
        let reference = resolve_at(&meta, "u", &config, today()).unwrap();
        assert_eq!(reference.title, "Only Open Graph");
    }

    #[test]
    fn test_date_priority() {
        let mut meta = RawMeta {
            title: "Post".to_string(),
            article_published_time: "2021-01-10T00:00:00Z".to_string(),
            og_updated_time: "2022-06-10T00:00:00Z".to_string(),
            article_modified_time: "2023-08-10T00:00:00Z".to_string(),
            ..Default::default()
        };
        let reference = resolve_default(&meta).unwrap();
        assert_eq!((reference.year.as_str(), reference.month.as_str()), ("2021", "Janvier"));
        assert_eq!(reference.slug, "2021-01-post");

        meta.article_published_time.clear();
        let reference = resolve_default(&meta).unwrap();
        assert_eq!((reference.year.as_str(), reference.month.as_str()), ("2022", "Juin"));

        meta.og_updated_time.clear();
        let reference = resolve_default(&meta).unwrap();
        assert_eq!((reference.year.as_str(), reference.month.as_str()), ("2023", "Août"));
    }

    #[test]
    fn test_lower_priority_dates_are_not_parsed() {
        let meta = RawMeta {
            article_published_time: "2020-05-01T12:00:00.5+01:00".to_string(),
            article_modified_time: "garbage".to_string(),
            ..Default::default()
        };
        let reference = resolve_default(&meta).unwrap();
        assert_eq!(reference.month, "Mai");
        assert_eq!(reference.slug, "2020-05");
    }

    #[test]
    fn test_invalid_date() {
        let meta = RawMeta {
            title: "Anything".to_string(),
            article_published_time: "not-a-date".to_string(),
            ..Default::default()
        };
        match resolve_default(&meta) {
            Err(ReferenceError::DateParse { value, .. }) => assert_eq!(value, "not-a-date"),
            Ok(reference) => panic!("Unexpected reference {:?}", reference),
        }
    }

    #[test]
    fn test_slug_is_deterministic() {
        let meta = RawMeta {
            title: "  Rust: Ownership & Borrowing ".to_string(),
            og_updated_time: "2024-11-02T09:00:00-03:00".to_string(),
            ..Default::default()
        };
        let first = resolve_default(&meta).unwrap();
        let second = resolve_default(&meta).unwrap();
        assert_eq!(first.slug, second.slug);
        assert_eq!(first.slug, "2024-11-rust-ownership-borrowing");
        assert!(!first.slug.chars().any(|c| c.is_whitespace() || c.is_uppercase()));
    }

    #[test]
    fn test_year_and_month_are_set_together() {
        let dates = ["", "2023-04-05T10:00:00+02:00", "0999-02-01T00:00:00Z"];
        for date in dates {
            let meta = RawMeta {
                og_updated_time: date.to_string(),
                ..Default::default()
            };
            let reference = resolve_default(&meta).unwrap();
            assert_eq!(reference.year.is_empty(), reference.month.is_empty(), "date={}", date);
        }
    }
}
