//! Directory identities as the engine sees them.

use serde::{Deserialize, Serialize};

use atrium_core::{EmailAddress, IdentityId};

/// An identity supplied by the user directory.
///
/// Only `is_internal` and the identity/email pairing matter to
/// authorization; everything else about a person lives outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub email: EmailAddress,
    pub display_name: String,
    pub is_internal: bool,
}

impl Identity {
    /// A previously unknown email provisioned on first contact.
    ///
    /// Provisioned identities default to external standing and take the
    /// email's local part as their display name.
    pub fn provisioned(email: EmailAddress) -> Self {
        let display_name = email.local_part().to_string();
        Self {
            id: IdentityId::new(),
            email,
            display_name,
            is_internal: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provisioned_identity_defaults_to_external() {
        let email = EmailAddress::new("guest@partner.io").unwrap();
        let identity = Identity::provisioned(email);
        assert!(!identity.is_internal);
        assert_eq!(identity.display_name, "guest");
    }
}
