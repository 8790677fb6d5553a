//! Mixed content detection on TLS pages

use regex::Regex;
use sitecheck_core::{
    AuditContext, Check, CheckInfo, CheckKind, Element, Issue, Result, Severity,
};
use std::sync::OnceLock;

/// Flags plaintext subresources and links on pages served over TLS
pub struct MixedContent {
    info: CheckInfo,
}

fn subresource_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)(?:src|href)\s*=\s*["'](http://[^"']+)["']"#).unwrap()
    })
}

impl MixedContent {
    pub fn new() -> Self {
        Self {
            info: CheckInfo::new("mixed_content", CheckKind::Passive, Severity::Medium)
                .with_description("Plaintext resources referenced from a TLS page")
                .with_element(Element::Body)
                .with_element(Element::Link)
                .with_preferred("security_headers"),
        }
    }
}

impl Default for MixedContent {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for MixedContent {
    fn info(&self) -> &CheckInfo {
        &self.info
    }

    fn run(&self, ctx: &AuditContext<'_>) -> Result<()> {
        if !ctx.page.https() {
            return Ok(());
        }

        for link in &ctx.page.links {
            if link.url.starts_with("http://") {
                ctx.log_issue(
                    Issue::builder("Plaintext link on TLS page", Element::Link)
                        .severity(Severity::Low)
                        .proof(link.url.clone())
                        .remediation("Link to the https equivalent")
                        .build(),
                );
            }
        }

        for capture in subresource_pattern().captures_iter(&ctx.page.body) {
            let target = &capture[1];
            ctx.log_issue(
                Issue::builder("Mixed content subresource", Element::Body)
                    .description(
                        "A resource on this TLS page loads over plaintext and can be \
                         tampered with in transit.",
                    )
                    .severity(Severity::Medium)
                    .proof(target.to_string())
                    .remediation("Serve the resource over https")
                    .build(),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::run_check;
    use sitecheck_core::{Link, Page};

    #[test]
    fn test_plain_http_page_is_out_of_scope() {
        let page = Page::new("http://example.com/")
            .with_link(Link::new("http://cdn.example.com/app.js"))
            .with_body(r#"<script src="http://cdn.example.com/app.js"></script>"#);
        assert!(run_check(&MixedContent::new(), &page).is_empty());
    }

    #[test]
    fn test_plaintext_link_is_flagged() {
        let page = Page::new("https://example.com/")
            .with_link(Link::new("http://example.com/help"))
            .with_link(Link::new("https://example.com/account"));
        let issues = run_check(&MixedContent::new(), &page);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].proof, "http://example.com/help");
    }

    #[test]
    fn test_plaintext_subresource_is_flagged() {
        let page = Page::new("https://example.com/")
            .with_body(r#"<img src="http://img.example.com/logo.png">"#);
        let issues = run_check(&MixedContent::new(), &page);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].element, Element::Body);
    }
}
