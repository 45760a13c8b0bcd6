//! Claims carried inside bearer tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Payload of an access token. Validity is signature plus expiry; nothing is
/// stored server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    /// Issued-at, Unix seconds
    pub iat: usize,
    /// Expiry, Unix seconds
    pub exp: usize,
}

impl Claims {
    /// The subject as a user id, or `None` if it is not a UUID.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_parses_subject() {
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id.to_string(),
            email: "a@x.com".to_string(),
            iat: 0,
            exp: 0,
        };
        assert_eq!(claims.user_id(), Some(id));
    }

    #[test]
    fn test_user_id_rejects_non_uuid_subject() {
        let claims = Claims {
            sub: "42".to_string(),
            email: "a@x.com".to_string(),
            iat: 0,
            exp: 0,
        };
        assert_eq!(claims.user_id(), None);
    }
}
