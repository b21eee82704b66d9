//! HTML → [`ChapterResult`] extraction, independent of any HTTP concerns.
//!
//! The reader page carries the series title and episode label as markup and
//! the page list as JSON embedded in a `data-value` attribute. Each field has
//! a primary class selector and a substring fallback for when the site
//! shuffles its class names.

use scraper::{Html, Selector};
use serde_json::Value;

use smpb_core::{
    domain::ChapterResult,
    errors::Error,
    utils::{lookup_path, sanitize_text},
    Result,
};

const PAGES_PATH: &str = "readableProduct/pageStructure/pages";

fn selector(css: &str) -> Selector {
    // Only ever called with fixed strings.
    Selector::parse(css).expect("static selector")
}

fn select_text(doc: &Html, primary: &str, fallback: &str) -> Option<String> {
    let element = doc
        .select(&selector(primary))
        .next()
        .or_else(|| doc.select(&selector(fallback)).next())?;
    Some(element.text().collect::<String>())
}

pub fn parse_chapter(html: &str) -> Result<ChapterResult> {
    let doc = Html::parse_document(html);

    let title = select_text(&doc, ".series-header-title", "[class*='series-title']")
        .ok_or_else(|| Error::ChapterParse("Chapter title not found".to_string()))?;
    let title = sanitize_text(&title);

    let chapter = select_text(&doc, ".episode-header-title", "[class*='episode-title']")
        .ok_or_else(|| Error::ChapterParse("Chapter number not found".to_string()))?;
    let chapter = sanitize_text(&chapter);

    let raw = doc
        .select(&selector("script#episode-json"))
        .next()
        .and_then(|el| el.value().attr("data-value"))
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::ChapterParse("Chapter data not found".to_string()))?;

    let episode: Value = serde_json::from_str(raw)?;
    let page_data = lookup_path(&episode, PAGES_PATH, Value::Array(Vec::new()))?;

    let pages: Vec<String> = page_data
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter(|e| e.get("type").and_then(Value::as_str) == Some("main"))
                .filter_map(|e| e.get("src").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if pages.is_empty() {
        return Err(Error::ChapterParse("No pages found in chapter".to_string()));
    }

    Ok(ChapterResult {
        title,
        chapter,
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPISODE_JSON: &str = r#"{"readableProduct":{"pageStructure":{"pages":[
        {"type":"main","src":"https://cdn.example/p1.jpg"},
        {"type":"backMatter"},
        {"type":"main","src":"https://cdn.example/p2.jpg"}
    ]}}}"#;

    fn fixture(title_markup: &str, episode_markup: &str, script_markup: &str) -> String {
        format!(
            "<html><body>\
             {title_markup}\
             {episode_markup}\
             {script_markup}\
             </body></html>"
        )
    }

    fn full_fixture() -> String {
        fixture(
            r#"<h1 class="series-header-title">My Series</h1>"#,
            r#"<p class="episode-header-title">Chapter 12</p>"#,
            &format!(r#"<script id="episode-json" data-value='{EPISODE_JSON}'></script>"#),
        )
    }

    #[test]
    fn parses_title_chapter_and_main_pages_in_order() {
        let result = parse_chapter(&full_fixture()).unwrap();
        assert_eq!(result.title, "My Series");
        assert_eq!(result.chapter, "Chapter 12");
        assert_eq!(
            result.pages,
            vec!["https://cdn.example/p1.jpg", "https://cdn.example/p2.jpg"]
        );
    }

    #[test]
    fn fallback_selectors_match_shuffled_class_names() {
        let html = fixture(
            r#"<h1 class="x-series-title-y">My Series</h1>"#,
            r#"<p class="new-episode-title">Chapter 12</p>"#,
            &format!(r#"<script id="episode-json" data-value='{EPISODE_JSON}'></script>"#),
        );
        let result = parse_chapter(&html).unwrap();
        assert_eq!(result.title, "My Series");
        assert_eq!(result.chapter, "Chapter 12");
    }

    #[test]
    fn title_text_is_sanitized() {
        let html = fixture(
            "<h1 class=\"series-header-title\">  My\u{0007} Series\u{FF01} </h1>",
            r#"<p class="episode-header-title">Chapter 12</p>"#,
            &format!(r#"<script id="episode-json" data-value='{EPISODE_JSON}'></script>"#),
        );
        let result = parse_chapter(&html).unwrap();
        // Control char dropped, fullwidth '！' decomposed, whitespace trimmed.
        assert_eq!(result.title, "My Series!");
    }

    #[test]
    fn missing_title_fails() {
        let html = fixture(
            "",
            r#"<p class="episode-header-title">Chapter 12</p>"#,
            &format!(r#"<script id="episode-json" data-value='{EPISODE_JSON}'></script>"#),
        );
        let err = parse_chapter(&html).unwrap_err();
        assert!(matches!(err, Error::ChapterParse(m) if m == "Chapter title not found"));
    }

    #[test]
    fn missing_episode_label_fails() {
        let html = fixture(
            r#"<h1 class="series-header-title">My Series</h1>"#,
            "",
            &format!(r#"<script id="episode-json" data-value='{EPISODE_JSON}'></script>"#),
        );
        let err = parse_chapter(&html).unwrap_err();
        assert!(matches!(err, Error::ChapterParse(m) if m == "Chapter number not found"));
    }

    #[test]
    fn missing_episode_json_fails() {
        let html = fixture(
            r#"<h1 class="series-header-title">My Series</h1>"#,
            r#"<p class="episode-header-title">Chapter 12</p>"#,
            "",
        );
        let err = parse_chapter(&html).unwrap_err();
        assert!(matches!(err, Error::ChapterParse(m) if m == "Chapter data not found"));
    }

    #[test]
    fn empty_data_value_fails_like_a_missing_script() {
        let html = fixture(
            r#"<h1 class="series-header-title">My Series</h1>"#,
            r#"<p class="episode-header-title">Chapter 12</p>"#,
            r#"<script id="episode-json" data-value=""></script>"#,
        );
        let err = parse_chapter(&html).unwrap_err();
        assert!(matches!(err, Error::ChapterParse(m) if m == "Chapter data not found"));
    }

    #[test]
    fn malformed_json_is_its_own_error() {
        let html = fixture(
            r#"<h1 class="series-header-title">My Series</h1>"#,
            r#"<p class="episode-header-title">Chapter 12</p>"#,
            r#"<script id="episode-json" data-value='{"broken'></script>"#,
        );
        let err = parse_chapter(&html).unwrap_err();
        assert!(matches!(err, Error::MalformedData(_)));
    }

    #[test]
    fn missing_page_structure_means_not_purchased() {
        let html = fixture(
            r#"<h1 class="series-header-title">My Series</h1>"#,
            r#"<p class="episode-header-title">Chapter 12</p>"#,
            r#"<script id="episode-json" data-value='{"readableProduct":{}}'></script>"#,
        );
        let err = parse_chapter(&html).unwrap_err();
        assert!(matches!(err, Error::ChapterUnavailable));
    }

    #[test]
    fn zero_main_pages_fails() {
        let html = fixture(
            r#"<h1 class="series-header-title">My Series</h1>"#,
            r#"<p class="episode-header-title">Chapter 12</p>"#,
            r#"<script id="episode-json" data-value='{"readableProduct":{"pageStructure":{"pages":[{"type":"backMatter"}]}}}'></script>"#,
        );
        let err = parse_chapter(&html).unwrap_err();
        assert!(matches!(err, Error::ChapterParse(m) if m == "No pages found in chapter"));
    }
}
