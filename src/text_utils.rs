use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, ParseResult};
use lazy_static::lazy_static;
use regex::Regex;

/// English month name and its French counterpart, in calendar order
pub const MONTHS: [(&str, &str); 12] = [
    ("January", "Janvier"),
    ("February", "Février"),
    ("March", "Mars"),
    ("April", "Avril"),
    ("May", "Mai"),
    ("June", "Juin"),
    ("July", "Juillet"),
    ("August", "Août"),
    ("September", "Septembre"),
    ("October", "Octobre"),
    ("November", "Novembre"),
    ("December", "Décembre"),
];

/// `month` goes from 1 to 12, as returned by chrono
pub fn french_month(month: u32) -> &'static str {
    let Some(index) = month.checked_sub(1) else {
        return "";
    };
    MONTHS.get(index as usize).map(|(_, fr)| *fr).unwrap_or("")
}

/// e.g. 05 Avril 2023
pub fn format_day(date: &NaiveDate) -> String {
    format!("{} {} {}", date.format("%d"), french_month(date.month()), date.format("%Y"))
}

/// Accepts date, time, numeric offset (or Z) and optional fractional seconds.
/// e.g. 2023-04-05T10:00:00+02:00 or 2023-04-05T10:00:00.123Z
pub fn parse_date_time(buf: &str) -> ParseResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(buf)
}

pub fn slugify(text: &str) -> String {
    lazy_static! {
        static ref SEPARATOR_REGEX: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    }

    let ascii = unidecode::unidecode(text).to_lowercase();
    let slug = SEPARATOR_REGEX.replace_all(&ascii, "-");
    slug.trim_matches('-').to_string()
}
