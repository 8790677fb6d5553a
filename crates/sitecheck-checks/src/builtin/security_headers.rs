//! Security response header analysis

use sitecheck_core::{
    AuditContext, Check, CheckInfo, CheckKind, Element, Issue, Result, Severity,
};

/// Flags missing or weakly configured security headers
pub struct SecurityHeaders {
    info: CheckInfo,
}

impl SecurityHeaders {
    pub fn new() -> Self {
        Self {
            info: CheckInfo::new("security_headers", CheckKind::Passive, Severity::Medium)
                .with_description("Missing or insecure security response headers")
                .with_element(Element::Header)
                .with_reference("https://owasp.org/www-project-secure-headers/"),
        }
    }

    fn check_csp(&self, ctx: &AuditContext<'_>) {
        match ctx.page.header("content-security-policy") {
            Some(value) => {
                if value.contains("'unsafe-inline'") || value.contains("'unsafe-eval'") {
                    ctx.log_issue(
                        Issue::builder("Content-Security-Policy allows unsafe script", Element::Header)
                            .description(
                                "The CSP carries 'unsafe-inline' or 'unsafe-eval', which \
                                 defeats most of its XSS protection.",
                            )
                            .severity(Severity::Low)
                            .proof(value.to_string())
                            .remediation("Remove 'unsafe-inline' and 'unsafe-eval' from the policy")
                            .build(),
                    );
                }
            }
            None => {
                ctx.log_issue(
                    Issue::builder("Missing Content-Security-Policy header", Element::Header)
                        .description("No CSP is set, leaving the page without script-source restrictions.")
                        .severity(Severity::Medium)
                        .proof("header absent")
                        .remediation("Add a Content-Security-Policy header")
                        .build(),
                );
            }
        }
    }

    fn check_frame_options(&self, ctx: &AuditContext<'_>) {
        match ctx.page.header("x-frame-options") {
            Some(value) => {
                let upper = value.to_uppercase();
                if upper != "DENY" && upper != "SAMEORIGIN" {
                    ctx.log_issue(
                        Issue::builder("Weak X-Frame-Options value", Element::Header)
                            .severity(Severity::Low)
                            .proof(value.to_string())
                            .remediation("Use DENY or SAMEORIGIN")
                            .build(),
                    );
                }
            }
            None => {
                ctx.log_issue(
                    Issue::builder("Missing X-Frame-Options header", Element::Header)
                        .description("Without framing restrictions the page can be embedded for clickjacking.")
                        .severity(Severity::Medium)
                        .proof("header absent")
                        .remediation("Add X-Frame-Options: DENY or a frame-ancestors CSP directive")
                        .build(),
                );
            }
        }
    }

    fn check_content_type_options(&self, ctx: &AuditContext<'_>) {
        let value = ctx.page.header("x-content-type-options");
        if !value.is_some_and(|v| v.eq_ignore_ascii_case("nosniff")) {
            ctx.log_issue(
                Issue::builder("Missing X-Content-Type-Options: nosniff", Element::Header)
                    .severity(Severity::Low)
                    .proof(value.unwrap_or("header absent").to_string())
                    .remediation("Add X-Content-Type-Options: nosniff")
                    .build(),
            );
        }
    }

    fn check_hsts(&self, ctx: &AuditContext<'_>) {
        // Only meaningful on TLS responses
        if ctx.page.https() && ctx.page.header("strict-transport-security").is_none() {
            ctx.log_issue(
                Issue::builder("Missing Strict-Transport-Security header", Element::Header)
                    .description("The page is served over TLS but does not opt in to HSTS.")
                    .severity(Severity::Medium)
                    .proof("header absent")
                    .remediation("Add Strict-Transport-Security with a max-age of at least one year")
                    .build(),
            );
        }
    }
}

impl Default for SecurityHeaders {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for SecurityHeaders {
    fn info(&self) -> &CheckInfo {
        &self.info
    }

    fn run(&self, ctx: &AuditContext<'_>) -> Result<()> {
        self.check_csp(ctx);
        self.check_frame_options(ctx);
        self.check_content_type_options(ctx);
        self.check_hsts(ctx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::run_check;
    use sitecheck_core::Page;

    fn hardened_page() -> Page {
        Page::new("https://example.com/")
            .with_header("Content-Security-Policy", "default-src 'self'")
            .with_header("X-Frame-Options", "DENY")
            .with_header("X-Content-Type-Options", "nosniff")
            .with_header("Strict-Transport-Security", "max-age=31536000")
    }

    #[test]
    fn test_hardened_page_is_clean() {
        let issues = run_check(&SecurityHeaders::new(), &hardened_page());
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn test_bare_page_raises_all_headers() {
        let page = Page::new("https://example.com/").with_header("Server", "nginx");
        let issues = run_check(&SecurityHeaders::new(), &page);

        let titles: Vec<_> = issues.iter().map(|i| i.title.as_str()).collect();
        assert!(titles.iter().any(|t| t.contains("Content-Security-Policy")));
        assert!(titles.iter().any(|t| t.contains("X-Frame-Options")));
        assert!(titles.iter().any(|t| t.contains("X-Content-Type-Options")));
        assert!(titles.iter().any(|t| t.contains("Strict-Transport-Security")));
    }

    #[test]
    fn test_unsafe_csp_is_flagged() {
        let page = Page::new("https://example.com/")
            .with_header("Content-Security-Policy", "default-src 'self' 'unsafe-inline'")
            .with_header("X-Frame-Options", "DENY")
            .with_header("X-Content-Type-Options", "nosniff")
            .with_header("Strict-Transport-Security", "max-age=31536000");

        let issues = run_check(&SecurityHeaders::new(), &page);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].title.contains("unsafe script"));
    }

    #[test]
    fn test_hsts_not_required_on_plain_http() {
        let page = Page::new("http://internal.example/")
            .with_header("Content-Security-Policy", "default-src 'self'")
            .with_header("X-Frame-Options", "SAMEORIGIN")
            .with_header("X-Content-Type-Options", "nosniff");
        let issues = run_check(&SecurityHeaders::new(), &page);
        assert!(issues.is_empty());
    }
}
