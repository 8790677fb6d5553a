//! Page content model - the unit of scanned content checks run against

use serde::{Deserialize, Serialize};

/// Content kinds a check can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    /// Anchor/resource links discovered on the page
    Link,
    /// HTML forms
    Form,
    /// Cookies set for the page
    Cookie,
    /// Response headers
    Header,
    /// Raw response body
    Body,
    /// The URL path itself (structural, always auditable)
    Path,
    /// The serving host (structural, always auditable)
    Server,
}

impl Element {
    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Link => "link",
            Element::Form => "form",
            Element::Cookie => "cookie",
            Element::Header => "header",
            Element::Body => "body",
            Element::Path => "path",
            Element::Server => "server",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A link discovered on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Link target URL (absolute or as found)
    pub url: String,
    /// Anchor text if any
    pub text: Option<String>,
}

impl Link {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// An HTML form discovered on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    /// Form action URL
    pub action: String,
    /// HTTP method (GET, POST, ...)
    pub method: String,
    /// Form inputs
    #[serde(default)]
    pub inputs: Vec<FormInput>,
}

impl Form {
    pub fn new(action: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: method.into(),
            inputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, input: FormInput) -> Self {
        self.inputs.push(input);
        self
    }

    /// True if the form carries a password input
    pub fn has_password_input(&self) -> bool {
        self.inputs
            .iter()
            .any(|i| i.input_type.eq_ignore_ascii_case("password"))
    }
}

/// A single form input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    /// Input name attribute
    pub name: String,
    /// Input type (text, password, hidden, ...)
    pub input_type: String,
    /// Default value if present
    pub value: Option<String>,
}

impl FormInput {
    pub fn new(name: impl Into<String>, input_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input_type: input_type.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// A cookie observed for the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// Secure attribute present
    #[serde(default)]
    pub secure: bool,
    /// HttpOnly attribute present
    #[serde(default)]
    pub http_only: bool,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            secure: false,
            http_only: false,
        }
    }

    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    pub fn http_only(mut self) -> Self {
        self.http_only = true;
        self
    }
}

/// A response header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A unit of scanned content: one response with everything discovered on it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// Page URL
    pub url: String,
    /// Links discovered on the page
    #[serde(default)]
    pub links: Vec<Link>,
    /// Forms discovered on the page
    #[serde(default)]
    pub forms: Vec<Form>,
    /// Cookies set for the page
    #[serde(default)]
    pub cookies: Vec<Cookie>,
    /// Response headers
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Raw response body
    #[serde(default)]
    pub body: String,
}

impl Page {
    /// Create a new page for a URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    pub fn with_form(mut self, form: Form) -> Self {
        self.forms.push(form);
        self
    }

    pub fn with_cookie(mut self, cookie: Cookie) -> Self {
        self.cookies.push(cookie);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    pub fn has_forms(&self) -> bool {
        !self.forms.is_empty()
    }

    pub fn has_cookies(&self) -> bool {
        !self.cookies.is_empty()
    }

    pub fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// True when the page was served over TLS
    pub fn https(&self) -> bool {
        self.url.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_predicates() {
        let page = Page::new("https://example.com/login")
            .with_header("Server", "nginx")
            .with_cookie(Cookie::new("session", "abc").http_only())
            .with_body("<html></html>");

        assert!(page.https());
        assert!(page.has_headers());
        assert!(page.has_cookies());
        assert!(page.has_body());
        assert!(!page.has_links());
        assert!(!page.has_forms());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let page = Page::new("http://example.com").with_header("X-Frame-Options", "DENY");
        assert_eq!(page.header("x-frame-options"), Some("DENY"));
        assert_eq!(page.header("X-FRAME-OPTIONS"), Some("DENY"));
        assert_eq!(page.header("content-type"), None);
    }

    #[test]
    fn test_form_password_detection() {
        let form = Form::new("/login", "POST")
            .with_input(FormInput::new("user", "text"))
            .with_input(FormInput::new("pass", "PASSWORD"));
        assert!(form.has_password_input());
    }
}
