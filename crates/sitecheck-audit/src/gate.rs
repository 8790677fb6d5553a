//! Applicability gating - decides whether a check runs against a page
//!
//! Pure and read-only; safe to call from any number of workers without
//! synchronization.

use sitecheck_checks::RegisteredCheck;
use sitecheck_core::{AuditConfig, CheckInfo, Element, Page};

/// Should this check run against this page under this configuration?
pub fn applies(entry: &RegisteredCheck, page: &Page, config: &AuditConfig) -> bool {
    // Overrides element matching unconditionally
    if entry.issue_limit_reached() {
        return false;
    }
    elements_apply(entry.info(), page, config)
}

/// Element-targeting half of the gate. A check with no declared elements
/// applies unconditionally; otherwise at least one targeted element must be
/// active on the page.
pub fn elements_apply(info: &CheckInfo, page: &Page, config: &AuditConfig) -> bool {
    if info.elements.is_empty() {
        return true;
    }
    info.elements
        .iter()
        .any(|e| element_active(*e, page, config))
}

fn element_active(element: Element, page: &Page, config: &AuditConfig) -> bool {
    match element {
        Element::Link => page.has_links() && config.audit_links,
        Element::Form => page.has_forms() && config.audit_forms,
        Element::Cookie => page.has_cookies() && config.audit_cookies,
        Element::Header => page.has_headers() && config.audit_headers,
        // No config gate on the body
        Element::Body => page.has_body(),
        // Structural, independent of page content and configuration
        Element::Path | Element::Server => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecheck_checks::CheckRegistry;
    use sitecheck_core::{
        AuditContext, Check, CheckKind, Cookie, Link, Result, Severity,
    };

    struct StubCheck {
        info: CheckInfo,
    }

    impl Check for StubCheck {
        fn info(&self) -> &CheckInfo {
            &self.info
        }

        fn run(&self, _ctx: &AuditContext<'_>) -> Result<()> {
            Ok(())
        }
    }

    fn entry_with_elements(elements: &[Element]) -> CheckRegistry {
        let registry = CheckRegistry::default();
        let mut info = CheckInfo::new("probe", CheckKind::Passive, Severity::Low);
        for e in elements {
            info = info.with_element(*e);
        }
        registry.register(Box::new(StubCheck { info })).unwrap();
        registry
    }

    #[test]
    fn test_elementless_check_always_applies() {
        let registry = entry_with_elements(&[]);
        let entry = registry.lookup("probe").unwrap();
        let empty = Page::new("https://example.com/");
        assert!(applies(&entry, &empty, &AuditConfig::default()));
    }

    #[test]
    fn test_issue_limit_overrides_element_match() {
        let registry = CheckRegistry::default();
        let info = CheckInfo::new("probe", CheckKind::Passive, Severity::Low)
            .with_element(Element::Link)
            .with_max_issues(1);
        registry.register(Box::new(StubCheck { info })).unwrap();
        let entry = registry.lookup("probe").unwrap();

        let page = Page::new("https://example.com/").with_link(Link::new("/a"));
        assert!(applies(&entry, &page, &AuditConfig::default()));

        entry.note_issues(1);
        assert!(!applies(&entry, &page, &AuditConfig::default()));
    }

    #[test]
    fn test_link_element_requires_links_and_config() {
        let registry = entry_with_elements(&[Element::Link]);
        let entry = registry.lookup("probe").unwrap();
        let config = AuditConfig::default();

        let bare = Page::new("https://example.com/");
        assert!(!applies(&entry, &bare, &config));

        let linked = Page::new("https://example.com/").with_link(Link::new("/a"));
        assert!(applies(&entry, &linked, &config));
        assert!(!applies(&entry, &linked, &config.clone().with_links(false)));
    }

    #[test]
    fn test_cookie_element_requires_cookies_and_config() {
        let registry = entry_with_elements(&[Element::Cookie]);
        let entry = registry.lookup("probe").unwrap();
        let page = Page::new("https://example.com/").with_cookie(Cookie::new("s", "v"));

        assert!(applies(&entry, &page, &AuditConfig::default()));
        assert!(!applies(
            &entry,
            &page,
            &AuditConfig::default().with_cookies(false)
        ));
    }

    #[test]
    fn test_body_element_ignores_config() {
        let registry = entry_with_elements(&[Element::Body]);
        let entry = registry.lookup("probe").unwrap();
        // Every toggle off; body auditing has no toggle
        let config = AuditConfig::default()
            .with_links(false)
            .with_forms(false)
            .with_cookies(false)
            .with_headers(false);

        let empty = Page::new("https://example.com/");
        assert!(!applies(&entry, &empty, &config));

        let with_body = empty.with_body("<html></html>");
        assert!(applies(&entry, &with_body, &config));
    }

    #[test]
    fn test_path_element_applies_to_empty_page() {
        let registry = entry_with_elements(&[Element::Path]);
        let entry = registry.lookup("probe").unwrap();
        // No links, forms, cookies, headers; empty body
        let empty = Page::new("https://example.com/some/path");
        assert!(applies(&entry, &empty, &AuditConfig::default()));
    }

    #[test]
    fn test_any_active_element_is_enough() {
        let registry = entry_with_elements(&[Element::Form, Element::Header]);
        let entry = registry.lookup("probe").unwrap();
        let page = Page::new("https://example.com/").with_header("Server", "nginx");

        // No forms, but headers are present and audited
        assert!(applies(&entry, &page, &AuditConfig::default()));
        assert!(!applies(
            &entry,
            &page,
            &AuditConfig::default().with_headers(false)
        ));
    }
}
