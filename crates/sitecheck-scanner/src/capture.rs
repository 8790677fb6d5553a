//! Build a Page from captured HTML

use scraper::{Html, Selector};
use sitecheck_core::{Error, Form, FormInput, Link, Page, Result};
use url::Url;

/// Parse captured HTML into a `Page`, extracting links and forms.
///
/// `base` is the URL the capture was taken from; relative link and form
/// targets resolve against it.
pub fn page_from_html(base: &str, html: &str) -> Result<Page> {
    let base_url =
        Url::parse(base).map_err(|e| Error::PageParse(format!("invalid base URL {base}: {e}")))?;

    let document = Html::parse_document(html);
    let mut page = Page::new(base_url.as_str()).with_body(html.to_string());

    let anchors = Selector::parse("a[href]").expect("static selector");
    for element in document.select(&anchors) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.starts_with('#') || href.starts_with("javascript:") {
            continue;
        }
        let Ok(resolved) = base_url.join(href) else {
            continue;
        };

        let text = element.text().collect::<String>().trim().to_string();
        let mut link = Link::new(resolved.to_string());
        if !text.is_empty() {
            link = link.with_text(text);
        }
        page.links.push(link);
    }

    let forms = Selector::parse("form").expect("static selector");
    let inputs = Selector::parse("input[name], textarea[name], select[name]")
        .expect("static selector");
    for element in document.select(&forms) {
        let action = element.value().attr("action").unwrap_or("");
        let action = base_url
            .join(action)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| action.to_string());
        let method = element.value().attr("method").unwrap_or("GET").to_uppercase();

        let mut form = Form::new(action, method);
        for input in element.select(&inputs) {
            let name = input.value().attr("name").unwrap_or_default();
            let input_type = input.value().attr("type").unwrap_or("text");
            let mut field = FormInput::new(name, input_type);
            if let Some(value) = input.value().attr("value") {
                field = field.with_value(value);
            }
            form.inputs.push(field);
        }
        page.forms.push(form);
    }

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
        <html><body>
          <a href="/about">About</a>
          <a href="https://other.example/">Elsewhere</a>
          <a href="#top">Top</a>
          <form action="/login" method="post">
            <input name="user" type="text">
            <input name="pass" type="password">
          </form>
        </body></html>
    "##;

    #[test]
    fn test_links_resolve_against_base() {
        let page = page_from_html("https://example.com/home", SAMPLE).unwrap();
        let urls: Vec<_> = page.links.iter().map(|l| l.url.as_str()).collect();

        assert_eq!(urls, vec!["https://example.com/about", "https://other.example/"]);
    }

    #[test]
    fn test_forms_carry_inputs() {
        let page = page_from_html("https://example.com/home", SAMPLE).unwrap();
        assert_eq!(page.forms.len(), 1);

        let form = &page.forms[0];
        assert_eq!(form.action, "https://example.com/login");
        assert_eq!(form.method, "POST");
        assert!(form.has_password_input());
    }

    #[test]
    fn test_invalid_base_url_is_an_error() {
        assert!(page_from_html("not a url", SAMPLE).is_err());
    }
}
