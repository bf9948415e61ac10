pub mod config;
pub mod logger;
pub mod meta;
pub mod reference;
pub mod fetch;
pub mod view;
pub mod text_utils;
mod test_data;

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::config::ResolverConfig;
    use crate::meta::meta_scanner::scan;
    use crate::reference::resolve_at;
    use crate::test_data::ARTICLE_PAGE;
    use crate::view::reference_renderer::ReferenceRenderer;
    use crate::view::Dialect;

    #[test]
    fn test_page_to_bibtex() {
        let meta = scan(ARTICLE_PAGE.as_bytes());
        let today = NaiveDate::from_ymd_opt(2024, 08, 15).unwrap();
        let reference = resolve_at(&meta, "https://example.com/a", &ResolverConfig::default(), today).unwrap();
        let renderer = ReferenceRenderer::new().unwrap();

        assert_eq!(renderer.render(&reference, Dialect::Bibtex), r#"@misc{ 2023-04-les-miserables,
  author = "Victor Hugo",
  title = "Les Misérables",
  year = "2023",
  month = "Avril",
  howpublished = "\url{ https://example.com/a }",
  note = "[En ligne, accédée le 15 Août 2024]"
}"#);
    }
}
