//! Built-in page checks

mod cookie_flags;
mod form_transport;
mod mixed_content;
mod reflected_input;
mod security_headers;

pub use cookie_flags::CookieFlags;
pub use form_transport::FormTransport;
pub use mixed_content::MixedContent;
pub use reflected_input::ReflectedInput;
pub use security_headers::SecurityHeaders;

use crate::registry::CheckRegistry;
use sitecheck_core::{Check, Result};

/// All built-in checks, boxed for registration
pub fn all() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(SecurityHeaders::new()),
        Box::new(CookieFlags::new()),
        Box::new(FormTransport::new()),
        Box::new(MixedContent::new()),
        Box::new(ReflectedInput::new()),
    ]
}

/// Register every built-in check with the given registry
pub fn register_all(registry: &CheckRegistry) -> Result<()> {
    for check in all() {
        registry.register(check)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_register_cleanly() {
        let registry = CheckRegistry::default();
        register_all(&registry).unwrap();
        assert_eq!(registry.len(), 5);
        assert!(registry.lookup("security_headers").is_ok());
        assert!(registry.lookup("reflected_input").is_ok());
    }
}
