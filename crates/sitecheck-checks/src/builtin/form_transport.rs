//! Credential form transport analysis

use sitecheck_core::{
    AuditContext, Check, CheckInfo, CheckKind, Element, Issue, Result, Severity,
};

/// Flags credential forms that submit over plaintext or leak via GET
pub struct FormTransport {
    info: CheckInfo,
}

impl FormTransport {
    pub fn new() -> Self {
        Self {
            info: CheckInfo::new("form_transport", CheckKind::Passive, Severity::High)
                .with_description("Credential forms submitting over insecure transport")
                .with_element(Element::Form),
        }
    }

    /// True when the action resolves to a plaintext URL from this page
    fn plaintext_action(page_https: bool, action: &str) -> bool {
        if action.starts_with("http://") {
            return true;
        }
        // Relative actions inherit the page scheme
        !action.starts_with("https://") && !page_https
    }
}

impl Default for FormTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for FormTransport {
    fn info(&self) -> &CheckInfo {
        &self.info
    }

    fn run(&self, ctx: &AuditContext<'_>) -> Result<()> {
        for form in &ctx.page.forms {
            if !form.has_password_input() {
                continue;
            }

            if Self::plaintext_action(ctx.page.https(), &form.action) {
                ctx.log_issue(
                    Issue::builder("Password submitted over plaintext", Element::Form)
                        .description(
                            "The form carries a password input but its action resolves to \
                             an unencrypted URL.",
                        )
                        .severity(Severity::High)
                        .proof(format!("form action '{}'", form.action))
                        .remediation("Submit credential forms to an https endpoint")
                        .build(),
                );
            }

            if form.method.eq_ignore_ascii_case("get") {
                ctx.log_issue(
                    Issue::builder("Credential form uses GET", Element::Form)
                        .description(
                            "Submitting credentials with GET places them in the URL, where \
                             they land in logs and browser history.",
                        )
                        .severity(Severity::Medium)
                        .proof(format!("form action '{}' method GET", form.action))
                        .remediation("Use POST for credential forms")
                        .build(),
                );
            }
        }
        Ok(())
    }
}
