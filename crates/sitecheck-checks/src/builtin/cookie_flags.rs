//! Cookie attribute analysis

use sitecheck_core::{
    AuditContext, Check, CheckInfo, CheckKind, Element, Issue, Result, Severity,
};

/// Flags cookies missing the Secure or HttpOnly attributes
pub struct CookieFlags {
    info: CheckInfo,
}

impl CookieFlags {
    pub fn new() -> Self {
        Self {
            info: CheckInfo::new("cookie_flags", CheckKind::Passive, Severity::Low)
                .with_description("Cookies set without Secure or HttpOnly attributes")
                .with_element(Element::Cookie)
                .with_reference("https://owasp.org/www-community/controls/SecureCookieAttribute"),
        }
    }
}

impl Default for CookieFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for CookieFlags {
    fn info(&self) -> &CheckInfo {
        &self.info
    }

    fn run(&self, ctx: &AuditContext<'_>) -> Result<()> {
        for cookie in &ctx.page.cookies {
            if ctx.page.https() && !cookie.secure {
                ctx.log_issue(
                    Issue::builder("Cookie set without the Secure attribute", Element::Cookie)
                        .description(
                            "The cookie is scoped to a TLS origin but can still be sent \
                             over plaintext connections.",
                        )
                        .severity(Severity::Low)
                        .proof(format!("cookie '{}' lacks Secure", cookie.name))
                        .remediation("Set the Secure attribute on the cookie")
                        .build(),
                );
            }

            if !cookie.http_only {
                ctx.log_issue(
                    Issue::builder("Cookie readable from script", Element::Cookie)
                        .description("Without HttpOnly the cookie is exposed to any injected script.")
                        .severity(Severity::Low)
                        .proof(format!("cookie '{}' lacks HttpOnly", cookie.name))
                        .remediation("Set the HttpOnly attribute on the cookie")
                        .build(),
                );
            }
        }
        Ok(())
    }
}
