//! Reflected parameter detection

use sitecheck_core::{
    AuditContext, Check, CheckInfo, CheckKind, Element, Issue, Result, Severity,
};
use url::Url;

// Shorter values reflect by coincidence far too often to report
const MIN_VALUE_LEN: usize = 4;

/// Detects query and form parameter values echoed verbatim in the body.
///
/// Classified active: a reflection is the observable half of an injection
/// probe, so its issues are digest-deduplicated across the whole scan.
pub struct ReflectedInput {
    info: CheckInfo,
}

impl ReflectedInput {
    pub fn new() -> Self {
        Self {
            info: CheckInfo::new("reflected_input", CheckKind::Active, Severity::High)
                .with_description("Parameter values reflected verbatim in the response body")
                .with_element(Element::Link)
                .with_element(Element::Form)
                .with_preferred("form_transport")
                .with_max_issues(25)
                .with_reference("https://owasp.org/www-community/attacks/xss/"),
        }
    }

    fn probe_url(&self, ctx: &AuditContext<'_>, raw: &str, element: Element) {
        let Ok(url) = Url::parse(raw) else {
            return;
        };

        for (name, value) in url.query_pairs() {
            if value.len() < MIN_VALUE_LEN || !ctx.page.body.contains(value.as_ref()) {
                continue;
            }
            ctx.log_issue(
                Issue::builder("Parameter value reflected in response", element)
                    .description(
                        "The response body echoes a request parameter without visible \
                         encoding, a precondition for reflected XSS.",
                    )
                    .severity(Severity::High)
                    .url(raw.to_string())
                    .proof(format!("parameter '{}' value '{}' found in body", name, value))
                    .remediation("Encode user input before writing it into the response")
                    .build(),
            );
        }
    }
}

impl Default for ReflectedInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for ReflectedInput {
    fn info(&self) -> &CheckInfo {
        &self.info
    }

    fn run(&self, ctx: &AuditContext<'_>) -> Result<()> {
        self.probe_url(ctx, &ctx.page.url, Element::Link);

        for link in &ctx.page.links {
            self.probe_url(ctx, &link.url, Element::Link);
        }

        for form in &ctx.page.forms {
            for input in &form.inputs {
                let Some(value) = &input.value else { continue };
                if value.len() >= MIN_VALUE_LEN && ctx.page.body.contains(value.as_str()) {
                    ctx.log_issue(
                        Issue::builder("Form default value reflected in response", Element::Form)
                            .severity(Severity::Medium)
                            .proof(format!(
                                "input '{}' value '{}' found in body",
                                input.name, value
                            ))
                            .remediation("Encode user input before writing it into the response")
                            .build(),
                    );
                }
            }
        }

        Ok(())
    }
}
