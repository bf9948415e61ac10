pub mod meta_scanner;

/// Metadata candidates found in the head of a page, before any fallback is applied.
///
/// Each field is either empty or the verbatim value found in the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMeta {
    pub title: String,
    pub og_title: String,
    pub author: String,
    pub article_author: String,
    pub og_updated_time: String,
    pub article_published_time: String,
    pub article_modified_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetaField {
    Author,
    ArticleAuthor,
    OgTitle,
    ArticlePublishedTime,
    ArticleModifiedTime,
    OgUpdatedTime,
}

/// Attribute of a `<meta>` tag telling which value the tag carries
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetaKey {
    Name,
    Property,
}

pub struct MetaTag {
    pub field: MetaField,
    pub key: MetaKey,
    pub value: &'static str,
}

/// `<meta>` tags collected by the scanner, e.g. `<meta name="author" content="...">`
pub const META_TAGS: [MetaTag; 6] = [
    MetaTag { field: MetaField::Author, key: MetaKey::Name, value: "author" },
    MetaTag { field: MetaField::ArticleAuthor, key: MetaKey::Property, value: "article:author" },
    MetaTag { field: MetaField::OgTitle, key: MetaKey::Property, value: "og:title" },
    MetaTag { field: MetaField::ArticlePublishedTime, key: MetaKey::Property, value: "article:published_time" },
    MetaTag { field: MetaField::ArticleModifiedTime, key: MetaKey::Property, value: "article:modified_time" },
    MetaTag { field: MetaField::OgUpdatedTime, key: MetaKey::Property, value: "og:updated_time" },
];

impl RawMeta {
    pub fn field_mut(&mut self, field: MetaField) -> &mut String {
        match field {
            MetaField::Author => &mut self.author,
            MetaField::ArticleAuthor => &mut self.article_author,
            MetaField::OgTitle => &mut self.og_title,
            MetaField::ArticlePublishedTime => &mut self.article_published_time,
            MetaField::ArticleModifiedTime => &mut self.article_modified_time,
            MetaField::OgUpdatedTime => &mut self.og_updated_time,
        }
    }
}
