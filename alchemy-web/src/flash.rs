//! One-shot status messages carried across a redirect in a cookie.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse, http};
use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::template::escape;

pub(crate) const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    Success,
    Error,
}

impl Level {
    fn tag(self) -> char {
        match self {
            Level::Success => 's',
            Level::Error => 'e',
        }
    }

    fn from_tag(tag: char) -> Option<Self> {
        match tag {
            's' => Some(Level::Success),
            'e' => Some(Level::Error),
            _ => None,
        }
    }

    fn css_class(self) -> &'static str {
        match self {
            Level::Success => "flash flash-success",
            Level::Error => "flash flash-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Flash {
    pub(crate) level: Level,
    pub(crate) message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Flashes(Vec<Flash>);

impl Flashes {
    pub(crate) fn success(message: impl Into<String>) -> Self {
        let mut flashes = Self::default();
        flashes.push(Level::Success, message);
        flashes
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        let mut flashes = Self::default();
        flashes.push(Level::Error, message);
        flashes
    }

    pub(crate) fn push(&mut self, level: Level, message: impl Into<String>) {
        self.0.push(Flash {
            level,
            message: message.into(),
        });
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Flash> {
        self.0.iter()
    }

    /// Payload: `<tag>:<percent-encoded message>` entries joined by `.`.
    pub(crate) fn encode(&self) -> String {
        self.0
            .iter()
            .map(|f| {
                format!(
                    "{}:{}",
                    f.level.tag(),
                    utf8_percent_encode(&f.message, NON_ALPHANUMERIC)
                )
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Parse a payload, skipping entries that do not decode.
    pub(crate) fn decode(value: &str) -> Self {
        let entries = value
            .split('.')
            .filter_map(|entry| {
                let (tag, message) = entry.split_once(':')?;
                let mut chars = tag.chars();
                let level = Level::from_tag(chars.next()?)?;
                if chars.next().is_some() {
                    return None;
                }
                let message = percent_decode_str(message).decode_utf8().ok()?;
                Some(Flash {
                    level,
                    message: message.into_owned(),
                })
            })
            .collect();
        Flashes(entries)
    }

    /// Pending messages of a request. `HttpRequest::cookie` already undoes
    /// the wire encoding added by [`Flashes::cookie`].
    pub(crate) fn from_request(req: &HttpRequest) -> Self {
        req.cookie(FLASH_COOKIE)
            .map(|c| Self::decode(c.value()))
            .unwrap_or_default()
    }

    pub(crate) fn to_html(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let items: String = self
            .iter()
            .map(|f| {
                format!(
                    "<li class=\"{}\">{}</li>",
                    f.level.css_class(),
                    escape(&f.message)
                )
            })
            .collect();
        format!("<ul class=\"flashes\">{items}</ul>")
    }

    /// The payload is percent-encoded once more for the wire: actix writes
    /// cookie values verbatim but percent-decodes them when parsing requests.
    fn cookie(&self) -> Cookie<'static> {
        let wire = utf8_percent_encode(&self.encode(), NON_ALPHANUMERIC).to_string();
        Cookie::build(FLASH_COOKIE, wire)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish()
    }
}

pub(crate) fn has_cookie(req: &HttpRequest) -> bool {
    req.cookie(FLASH_COOKIE).is_some()
}

/// Cookie that tells the browser to drop pending messages.
pub(crate) fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}

/// `303 See Other` to `location`, carrying `flashes` to the next page.
pub(crate) fn redirect(location: &str, flashes: &Flashes) -> HttpResponse {
    let mut response = HttpResponse::SeeOther();
    response.insert_header((http::header::LOCATION, location));
    if !flashes.is_empty() {
        response.cookie(flashes.cookie());
    }
    response.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_cookie_value_is_cookie_safe() {
        let mut flashes = Flashes::success("Book 'Dune; part 1' added, \"yay\"");
        flashes.push(Level::Error, "naïve . dots : colons");
        let encoded = flashes.encode();
        assert!(
            encoded
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '%' | ':' | '.'))
        );
        assert_eq!(Flashes::decode(&encoded), flashes);
    }

    #[test]
    fn test_decode_skips_garbage() {
        let decoded = Flashes::decode("x:abc.s:ok.e.ss:nope.e:%FF.e:bad%20news");
        let messages: Vec<(Level, &str)> = decoded
            .iter()
            .map(|f| (f.level, f.message.as_str()))
            .collect();
        assert_eq!(
            messages,
            vec![(Level::Success, "ok"), (Level::Error, "bad news")]
        );
    }

    #[test]
    fn test_to_html_escapes() {
        let html = Flashes::error("<b>nope</b>").to_html();
        assert!(html.contains("flash-error"));
        assert!(html.contains("&lt;b&gt;nope"));
        assert!(Flashes::default().to_html().is_empty());
    }

    /// Value of the `flash` pair as a browser would send it back.
    fn set_cookie_pair(response: &HttpResponse) -> String {
        response
            .headers()
            .get_all(http::header::SET_COOKIE)
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .map(|pair| pair.trim().to_string())
            .find(|pair| pair.starts_with("flash="))
            .unwrap()
    }

    #[test]
    fn test_from_request() {
        let flashes = Flashes::success("done");
        let pair = set_cookie_pair(&redirect("/", &flashes));
        let req = TestRequest::default()
            .insert_header((http::header::COOKIE, pair))
            .to_http_request();
        assert!(has_cookie(&req));
        assert_eq!(Flashes::from_request(&req), flashes);

        let req = TestRequest::default().to_http_request();
        assert!(!has_cookie(&req));
        assert!(Flashes::from_request(&req).is_empty());
    }

    #[test]
    fn test_browser_roundtrip_keeps_dots_and_percents() {
        let mut flashes = Flashes::success("Author 'J.R.R. Tolkien 100%41' added successfully.");
        flashes.push(Level::Error, "a.b:c%2Ed");
        let pair = set_cookie_pair(&redirect("/add_author", &flashes));
        let value = pair.strip_prefix("flash=").unwrap();
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric() || c == '%'));

        let req = TestRequest::default()
            .insert_header((http::header::COOKIE, pair.as_str()))
            .to_http_request();
        assert_eq!(Flashes::from_request(&req), flashes);
    }

    #[test]
    fn test_redirect() {
        let response = redirect("/add_book", &Flashes::success("ok"));
        assert_eq!(response.status(), http::StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(http::header::LOCATION).unwrap(),
            "/add_book"
        );
        assert_eq!(set_cookie_pair(&response), "flash=s%3Aok");
    }
}
