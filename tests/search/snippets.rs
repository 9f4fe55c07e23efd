//! Page items: titles, descriptions and highlight markup.

use crate::common::{doc, engine_over, marked, sample_docs, strip_marks};
use glean::testing::{make_config, make_source};
use glean::{PageItem, SearchEngine, DEFAULT_MARK};

fn item<'a>(items: &'a [PageItem], link: &str) -> &'a PageItem {
    items
        .iter()
        .find(|item| item.link == link)
        .unwrap_or_else(|| panic!("no item for {}", link))
}

#[test]
fn test_suggest_marks_the_phrase_in_a_short_excerpt() {
    let mut engine = engine_over(&sample_docs(), 2);
    let items = engine.suggest("brown fox", 10).unwrap();

    let fox = item(&items, "animals/fox.html");
    assert_eq!(fox.title, "Foxes");
    assert_eq!(
        fox.description,
        "quick <span class=\"search-highlight\">brown fox</span> jumps"
    );

    let bear = item(&items, "animals/bear.html");
    assert_eq!(marked(&bear.description, DEFAULT_MARK), vec!["brown", "fox"]);
}

#[test]
fn test_title_matches_are_marked() {
    let mut engine = engine_over(&sample_docs(), 0);
    let items = engine.suggest("installation", 10).unwrap();

    let install = item(&items, "guide/install.html");
    assert_eq!(
        install.title,
        "<span class=\"search-highlight\">Installation</span>"
    );
}

#[test]
fn test_keyword_only_match_renders_raw_fields() {
    let mut engine = engine_over(&sample_docs(), 0);
    let page = engine.search_page("setup", 10, 1).unwrap();
    assert_eq!(page.total, 2);

    let install = item(&page.items, "guide/install.html");
    assert_eq!(install.title, "Installation");
    assert_eq!(
        install.description,
        "Install the package, then run the installer again to verify."
    );

    let cafe = item(&page.items, "guide/cafe.html");
    assert_eq!(marked(&cafe.title, DEFAULT_MARK), vec!["setup"]);
}

#[test]
fn test_long_document_gets_a_line_window() {
    let filler = "lorem ipsum dolor sit amet consectetur adipiscing elit";
    let mut lines: Vec<String> = (0..12).map(|i| format!("line {:02} {}", i, filler)).collect();
    lines.insert(6, "where the quick brown fox jumps".to_string());
    let content = lines.join("\n");
    let docs = vec![doc("long.html", "Long", &content)];

    let mut engine = engine_over(&docs, 0);
    let page = engine.search_page("brown fox", 10, 1).unwrap();
    let description = &page.items[0].description;

    assert_eq!(marked(description, DEFAULT_MARK), vec!["brown fox"]);
    let plain = strip_marks(description);
    assert!(!plain.contains("line 00"));
    assert!(!plain.starts_with(char::is_whitespace));
    assert!(plain.contains("where the quick brown fox jumps\n"));
    // Whole lines: the window never starts mid-line.
    assert!(plain.starts_with("line "));
    assert!(content.contains(plain.trim_end()));
}

#[test]
fn test_suggest_keeps_head_context_short() {
    let content = format!("{} the needle sits here", "padding words ".repeat(10));
    let docs = vec![doc("n.html", "N", &content)];

    let mut engine = engine_over(&docs, 0);
    let items = engine.suggest("needle", 10).unwrap();
    let description = &items[0].description;

    assert!(description.starts_with("..."));
    let before = description
        .split("<span")
        .next()
        .unwrap_or_default()
        .trim_start_matches("...");
    assert_eq!(before.chars().count(), 20);
}

#[test]
fn test_custom_mark_and_base() {
    let mut config = make_config(2);
    config.mark = "hit".to_string();
    config.base = "https://docs.example.com/".to_string();

    let mut engine = SearchEngine::new();
    engine.initialize(config, make_source(&sample_docs()));
    let items = engine.suggest("quick", 10).unwrap();

    assert_eq!(items[0].link, "https://docs.example.com/animals/fox.html");
    assert_eq!(marked(&items[0].description, "hit"), vec!["quick"]);
    assert!(!items[0].description.contains(DEFAULT_MARK));
}

#[test]
fn test_markup_is_inserted_verbatim() {
    let docs = vec![doc("raw.html", "Raw", "use <b>bold</b> and fox")];
    let mut engine = engine_over(&docs, 0);
    let items = engine.suggest("fox", 10).unwrap();

    assert_eq!(
        items[0].description,
        "use <b>bold</b> and <span class=\"search-highlight\">fox</span>"
    );
}
