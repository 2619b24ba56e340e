use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, http};
use askama_escape::{Html, escape as escape_html_entity};

use crate::flash;

pub const BASE_TEMPLATE: &str = include_str!("templates/base.html");
pub const INDEX_TEMPLATE: &str = include_str!("templates/index.html");
pub const BOOK_ROW_TEMPLATE: &str = include_str!("templates/book_row.html");
pub const ADD_AUTHOR_TEMPLATE: &str = include_str!("templates/add_author.html");
pub const ADD_BOOK_TEMPLATE: &str = include_str!("templates/add_book.html");

const SITE_CSS: &str = include_str!("styles/site.css");

/// Substitute `[[key]]` placeholders in a single pass.
///
/// Substituted values are never rescanned, so user text containing `[[...]]`
/// stays literal. Unknown placeholders are kept as they are.
pub fn render(template: &str, variables: &HashMap<&str, String>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("[[") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("]]") {
            Some(end) => {
                let key = &after[..end];
                match variables.get(key) {
                    Some(value) => result.push_str(value),
                    None => {
                        result.push_str("[[");
                        result.push_str(key);
                        result.push_str("]]");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);

    result
}

pub fn render_page(title: &str, flashes: &str, content: &str) -> String {
    let mut vars = HashMap::new();
    vars.insert("title", escape(title));
    vars.insert("css", SITE_CSS.to_string());
    vars.insert("flashes", flashes.to_string());
    vars.insert("content", content.to_string());

    render(BASE_TEMPLATE, &vars)
}

/// HTML-escape text for use in element content or quoted attributes.
pub fn escape(text: &str) -> String {
    escape_html_entity(text, Html).to_string()
}

/// Render a full HTML page, showing and clearing any pending flashed messages.
pub(crate) fn page_response(req: &HttpRequest, title: &str, content: &str) -> HttpResponse {
    let flashes = flash::Flashes::from_request(req);
    let html = render_page(title, &flashes.to_html(), content);

    let mut response = HttpResponse::Ok();
    response.insert_header(http::header::ContentType(mime::TEXT_HTML_UTF_8));
    if flash::has_cookie(req) {
        response.cookie(flash::removal_cookie());
    }
    response.body(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_known_keys() {
        let mut vars = HashMap::new();
        vars.insert("name", "Dune".to_string());
        assert_eq!(render("<b>[[name]]</b> [[name]]", &vars), "<b>Dune</b> Dune");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let mut vars = HashMap::new();
        vars.insert("a", "[[b]]".to_string());
        vars.insert("b", "oops".to_string());
        assert_eq!(render("[[a]]|[[b]]", &vars), "[[b]]|oops");
    }

    #[test]
    fn test_render_keeps_unknown_and_unterminated() {
        let vars = HashMap::new();
        assert_eq!(render("x [[missing]] y [[open", &vars), "x [[missing]] y [[open");
    }

    #[test]
    fn test_escape() {
        let escaped = escape(r#"<b>"x" & y"#);
        assert!(escaped.starts_with("&lt;b&gt;"));
        assert!(escaped.contains("&amp;"));
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains('<'));
    }
}
