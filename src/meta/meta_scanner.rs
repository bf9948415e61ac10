use std::io;
use std::io::BufRead;

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use spdlog::{debug, trace};

use crate::meta::{MetaKey, MetaTag, RawMeta, META_TAGS};

/// Elements whose content is plain text up to their end tag, never markup
const RAW_TEXT_ELEMENTS: [&[u8]; 2] = [b"script", b"style"];

/// Only two things matter while reading the head: whether the next text is the page title or not.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ScanState {
    Scanning,
    TitlePending,
}

/// Streams the document and collects the metadata found before `<body>`.
///
/// The scan never fails. Malformed markup or a read error ends it early and
/// whatever was collected until then is returned. Nothing after `<body>` is read.
pub fn scan<R: BufRead>(source: R) -> RawMeta {
    let mut reader = Reader::from_reader(source);
    let config = reader.config_mut();
    // HTML leaves <meta>, <link> and friends open
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut meta = RawMeta::default();
    let mut state = ScanState::Scanning;
    let mut buf = Vec::new();

    loop {
        if state == ScanState::TitlePending {
            // <title> holds text only, a '<' in it is not a tag
            match read_raw_text(reader.stream(), b"title") {
                Ok(raw) => {
                    meta.title = decode_raw_text(&raw);
                    trace!("Found title {:?}", meta.title);
                }
                Err(e) => {
                    debug!("Stopping scan inside <title>: {}", e);
                    break;
                }
            }
            state = ScanState::Scanning;
        }

        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref tag)) => {
                if is_tag(tag, b"body") {
                    debug!("Reached <body> at byte {}, stopping scan", reader.buffer_position());
                    break;
                }
                if let Some(name) = raw_text_element(tag) {
                    if let Err(e) = read_raw_text(reader.stream(), name) {
                        debug!("Stopping scan inside <{}>: {}", String::from_utf8_lossy(name), e);
                        break;
                    }
                } else {
                    open_tag(tag, &mut meta, &mut state);
                }
            }
            Ok(Event::Empty(ref tag)) => {
                if is_tag(tag, b"body") {
                    debug!("Reached <body/> at byte {}, stopping scan", reader.buffer_position());
                    break;
                }
                open_tag(tag, &mut meta, &mut state);
            }
            Ok(Event::Eof) => {
                debug!("End of document reached without <body>");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                debug!("Stopping scan at byte {}: {}", reader.error_position(), e);
                break;
            }
        }
        buf.clear();
    }

    meta
}

pub fn scan_str(document: &str) -> RawMeta {
    scan(document.as_bytes())
}

fn open_tag(tag: &BytesStart, meta: &mut RawMeta, state: &mut ScanState) {
    if is_tag(tag, b"title") {
        *state = ScanState::TitlePending;
    } else if is_tag(tag, b"meta") {
        collect_meta(tag, meta);
    }
}

fn is_tag(tag: &BytesStart, name: &[u8]) -> bool {
    tag.name().as_ref().eq_ignore_ascii_case(name)
}

fn raw_text_element(tag: &BytesStart) -> Option<&'static [u8]> {
    RAW_TEXT_ELEMENTS.iter()
        .copied()
        .find(|name| is_tag(tag, name))
}

fn decode_raw_text(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    unescape_with(&text, resolve_html5_entity)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| text.to_string())
}

#[derive(Debug, PartialEq)]
enum EndTag {
    /// `start` is the '<' of the end tag, `end` is just past its '>'
    Found { start: usize, end: usize },
    /// Looks like the end tag from `start` but more bytes are needed
    Partial(usize),
    NotFound,
}

fn is_tag_delimiter(b: u8) -> bool {
    matches!(b, b'>' | b'/' | b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

/// Looks for `</name` followed by a delimiter and the closing '>', ignoring case.
fn find_end_tag(text: &[u8], name: &[u8], from: usize) -> EndTag {
    let prefix_len = name.len() + 2;
    let mut pos = from;

    while let Some(offset) = text[pos..].iter().position(|&b| b == b'<') {
        let start = pos + offset;
        let rest = &text[start..];
        let known = rest.len().min(prefix_len);
        let prefix_matches = (known < 2 || rest[1] == b'/')
            && (known <= 2 || rest[2..known].eq_ignore_ascii_case(&name[..known - 2]));

        if prefix_matches && rest.len() <= prefix_len {
            return EndTag::Partial(start);
        }
        if prefix_matches && is_tag_delimiter(rest[prefix_len]) {
            return match rest[prefix_len..].iter().position(|&b| b == b'>') {
                Some(gt) => EndTag::Found { start, end: start + prefix_len + gt + 1 },
                None => EndTag::Partial(start),
            };
        }
        pos = start + 1;
    }

    EndTag::NotFound
}

/// Reads the content of a raw text element and consumes its end tag.
///
/// Stops right after the end tag, the markup that follows is left in the stream.
/// Without an end tag, everything up to the end of the document is returned.
fn read_raw_text<S: BufRead>(mut stream: S, name: &[u8]) -> io::Result<Vec<u8>> {
    let mut text = Vec::new();
    let mut from = 0;

    loop {
        let available = stream.fill_buf()?;
        if available.is_empty() {
            return Ok(text);
        }
        let old_len = text.len();
        text.extend_from_slice(available);

        match find_end_tag(&text, name, from) {
            EndTag::Found { start, end } => {
                stream.consume(end - old_len);
                text.truncate(start);
                return Ok(text);
            }
            EndTag::Partial(start) => from = start,
            EndTag::NotFound => from = text.len().saturating_sub(name.len() + 3),
        }
        stream.consume(text.len() - old_len);
    }
}

#[derive(Debug, Default)]
struct MetaAttributes {
    name: Option<String>,
    property: Option<String>,
    content: Option<String>,
}

impl MetaAttributes {
    fn from_tag(tag: &BytesStart) -> MetaAttributes {
        let mut attrs = MetaAttributes::default();
        let mut html_attrs = tag.html_attributes();
        html_attrs.with_checks(false);

        for attr in html_attrs {
            let Ok(attr) = attr else {
                break;
            };

            let slot = match attr.key.as_ref() {
                key if key.eq_ignore_ascii_case(b"name") => &mut attrs.name,
                key if key.eq_ignore_ascii_case(b"property") => &mut attrs.property,
                key if key.eq_ignore_ascii_case(b"content") => &mut attrs.content,
                _ => continue,
            };

            // First occurrence wins
            if slot.is_none() {
                let value = match attr.unescape_value_with(resolve_html5_entity) {
                    Ok(value) => value.into_owned(),
                    Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
                };
                *slot = Some(value);
            }
        }

        attrs
    }

    fn matches(&self, meta_tag: &MetaTag) -> bool {
        let discriminator = match meta_tag.key {
            MetaKey::Name => &self.name,
            MetaKey::Property => &self.property,
        };
        discriminator.as_deref() == Some(meta_tag.value)
    }
}

fn collect_meta(tag: &BytesStart, meta: &mut RawMeta) {
    let attrs = MetaAttributes::from_tag(tag);
    let Some(ref content) = attrs.content else {
        return;
    };

    for meta_tag in META_TAGS.iter().filter(|t| attrs.matches(t)) {
        trace!("Found meta {} = {:?}", meta_tag.value, content);
        *meta.field_mut(meta_tag.field) = content.clone();
    }
}
