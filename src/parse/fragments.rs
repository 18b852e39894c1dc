// src/parse/fragments.rs

use scraper::{Html, Selector};
use url::Url;

use crate::fetch::BASE_URL;

/// One self-contained unit of raw page content for a single notice, holding
/// visible text only. Missing pieces are empty strings; whether that makes
/// the fragment unusable is the listing parser's call.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub title: String,
    pub link: String,
    pub body: String,
}

/// Card containers tried in precedence order against a rendered page. The
/// first selector with any matches wins.
const CARD_SELECTORS: [&str; 3] = ["div.scheda-annuncio", "div.box-annuncio", "article"];

/// True when a raw page carries feed listing markers. The client-rendered
/// app shell has none, which is the signal to fall back to a browser
/// capture.
pub fn page_has_listings(page: &str) -> bool {
    page.to_ascii_lowercase().contains("<item>")
}

/// True when a raw page is a feed envelope at all, items or not. An
/// item-less feed is a query that succeeded with zero results; only a body
/// that is no feed signals the app shell.
pub fn page_is_feed(page: &str) -> bool {
    let lower = page.to_ascii_lowercase();
    lower.contains("<rss") || lower.contains("<channel")
}

/// Split one raw page into notice fragments. Feed pages are scanned for
/// `<item>` blocks; anything else goes through the rendered-card path.
pub fn split_fragments(page: &str) -> Vec<Fragment> {
    if page_has_listings(page) {
        feed_fragments(page)
    } else {
        card_fragments(page)
    }
}

fn feed_fragments(page: &str) -> Vec<Fragment> {
    item_blocks(page)
        .into_iter()
        .map(|block| Fragment {
            title: tag_text(block, "title").unwrap_or_default(),
            link: tag_text(block, "link").unwrap_or_default(),
            body: tag_text(block, "description").unwrap_or_default(),
        })
        .collect()
}

/// Slice out every `<item>…</item>` block. Tag search is case-insensitive
/// and works on byte offsets, so slices come from the original text.
fn item_blocks(page: &str) -> Vec<&str> {
    let lower = page.to_ascii_lowercase();
    let mut blocks = Vec::new();
    let mut from = 0;

    while let Some(open) = lower[from..].find("<item>") {
        let start = from + open + "<item>".len();
        match lower[start..].find("</item>") {
            Some(close) => {
                blocks.push(&page[start..start + close]);
                from = start + close + "</item>".len();
            }
            None => break,
        }
    }

    blocks
}

/// Inner text of the first `<tag>…</tag>` in `block`: CDATA unwrapped,
/// markup stripped, entities decoded, whitespace trimmed. None when the tag
/// is absent or never closed.
fn tag_text(block: &str, tag: &str) -> Option<String> {
    let lower = block.to_ascii_lowercase();
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    let open_at = lower.find(&open)?;
    let content_at = open_at + lower[open_at..].find('>')? + 1;
    let close_at = content_at + lower[content_at..].find(&close)?;

    let mut inner = block[content_at..close_at].trim();
    if let Some(unwrapped) = inner.strip_prefix("<![CDATA[") {
        inner = unwrapped.strip_suffix("]]>").unwrap_or(unwrapped).trim();
    }

    Some(decode_entities(&strip_tags(inner)).trim().to_string())
}

/// Drop `<…>` runs, keeping the text between them.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Decode the named XML entities plus numeric character references.
/// Anything unrecognized is kept literally.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest.find(';').and_then(|end| {
            let entity = &rest[1..end];
            let c = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity.strip_prefix('#').and_then(|num| {
                    let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => num.parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }),
            };
            c.map(|c| (c, end))
        });

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Extract one fragment per listing card from a rendered document.
fn card_fragments(page: &str) -> Vec<Fragment> {
    let document = Html::parse_document(page);

    let (heading, anchor) = match (Selector::parse("h1, h2, h3, h4"), Selector::parse("a[href]")) {
        (Ok(heading), Ok(anchor)) => (heading, anchor),
        _ => return Vec::new(),
    };

    for selector_str in CARD_SELECTORS {
        let selector = match Selector::parse(selector_str) {
            Ok(selector) => selector,
            Err(_) => continue,
        };

        let cards: Vec<_> = document.select(&selector).collect();
        if cards.is_empty() {
            continue;
        }

        return cards
            .iter()
            .map(|card| {
                let title = card
                    .select(&heading)
                    .next()
                    .map(|h| normalize_ws(&h.text().collect::<Vec<_>>().join(" ")))
                    .unwrap_or_default();
                let link = card
                    .select(&anchor)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .map(absolute_link)
                    .unwrap_or_default();
                let body = normalize_ws(&card.text().collect::<Vec<_>>().join(" "));

                Fragment { title, link, body }
            })
            .collect();
    }

    Vec::new()
}

fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve a card href against the source site; already-absolute links pass
/// through untouched.
fn absolute_link(href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    Url::parse(BASE_URL)
        .and_then(|base| base.join(href))
        .map(|url| url.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_PAGE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0"><channel>
<title>Astalegale.net - Immobili</title>
<item>
<title><![CDATA[Via Roma 10, Torino - Lotto unico - Tribunale di Torino - Rif. #TO123456]]></title>
<link>https://www.astalegale.net/Immobili/Dettaglio/123456</link>
<description><![CDATA[Appartamento al terzo piano - Tipologia: Abitazione di tipo civile - Prezzo: 70.000,00 &#8364; - Data asta: 17/03/2026 - 12:00]]></description>
</item>
<item>
<title>Corso Francia 5, Torino - Lotto 2 - Tribunale di Torino - Rif. #TO654321</title>
<link>https://www.astalegale.net/Immobili/Dettaglio/654321</link>
<description>Bilocale &amp; cantina - Tipologia: Appartamento - Prezzo: 55.500,00 € - Data asta: 02/04/2026 - 15:30</description>
</item>
<item>
<description>Frammento senza titolo</description>
</item>
</channel></rss>"#;

    const APP_SHELL: &str = r#"<!DOCTYPE html>
<html><head><title>Astalegale.net</title></head>
<body><div id="app"></div><script src="/bundle.js"></script></body></html>"#;

    #[test]
    fn feed_pages_are_detected_by_item_markers() {
        assert!(page_has_listings(FEED_PAGE));
        assert!(!page_has_listings(APP_SHELL));
    }

    #[test]
    fn an_item_less_feed_is_still_a_feed() {
        let empty_feed = r#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0"><channel>
<title>Astalegale.net - Immobili</title>
</channel></rss>"#;

        assert!(page_is_feed(empty_feed));
        assert!(!page_has_listings(empty_feed));
        assert!(page_is_feed(FEED_PAGE));
        assert!(!page_is_feed(APP_SHELL));
    }

    #[test]
    fn feed_page_splits_into_one_fragment_per_item() {
        let fragments = split_fragments(FEED_PAGE);
        assert_eq!(fragments.len(), 3);

        assert_eq!(
            fragments[0].title,
            "Via Roma 10, Torino - Lotto unico - Tribunale di Torino - Rif. #TO123456"
        );
        assert_eq!(
            fragments[0].link,
            "https://www.astalegale.net/Immobili/Dettaglio/123456"
        );
        // Numeric euro entity decodes even inside a CDATA payload.
        assert!(fragments[0].body.contains("Prezzo: 70.000,00 €"));

        assert!(fragments[1].body.contains("Bilocale & cantina"));

        assert_eq!(fragments[2].title, "");
        assert_eq!(fragments[2].link, "");
        assert_eq!(fragments[2].body, "Frammento senza titolo");
    }

    #[test]
    fn app_shell_yields_no_fragments() {
        assert!(split_fragments(APP_SHELL).is_empty());
    }

    #[test]
    fn rendered_cards_become_fragments() {
        let page = r#"<html><body>
<article><h2>Via Nizza 45, Torino - Lotto 1 - Rif. #TO777</h2>
<a href="/Immobili/Dettaglio/777">dettagli</a>
<p>Tipologia: Appartamento - Prezzo: 88.000,00 € - Data asta: 05/05/2026 - 10:00</p></article>
<article><h2>Via Garibaldi 2, Torino</h2>
<a href="https://www.astalegale.net/Immobili/Dettaglio/778">dettagli</a>
<p>Senza prezzo</p></article>
</body></html>"#;

        let fragments = split_fragments(page);
        assert_eq!(fragments.len(), 2);

        assert_eq!(fragments[0].title, "Via Nizza 45, Torino - Lotto 1 - Rif. #TO777");
        assert_eq!(
            fragments[0].link,
            "https://www.astalegale.net/Immobili/Dettaglio/777"
        );
        assert!(fragments[0].body.contains("Prezzo: 88.000,00 €"));
        assert_eq!(
            fragments[1].link,
            "https://www.astalegale.net/Immobili/Dettaglio/778"
        );
    }

    #[test]
    fn entities_decode_and_unknown_ones_stay_literal() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("&#8364;100 &#x20AC;"), "€100 €");
        assert_eq!(decode_entities("AT&T; &bogus;&"), "AT&T; &bogus;&");
    }

    #[test]
    fn markup_inside_descriptions_is_stripped() {
        assert_eq!(
            strip_tags("Piano terzo<br/>con cantina <b>e box</b>"),
            "Piano terzocon cantina e box"
        );
    }

    #[test]
    fn unclosed_items_are_ignored() {
        let page = "<rss><item><title>ok</title></item><item><title>troncato</title>";
        let fragments = split_fragments(page);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].title, "ok");
    }
}
