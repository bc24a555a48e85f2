use error_stack::Report;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use kernel::interface::query::IdentityQuery;
use kernel::prelude::entity::{AccessToken, Identity, Role, UserId};
use kernel::{ErrorMessage, KernelError};

use crate::env;

const JWT_SECRET: &str = "JWT_SECRET";

const EXPIRED: &str = "Your token has expired. Please log in again.";
const INVALID: &str = "Invalid token. Please log in again.";

/// Lifetime of a token handed out by [`JwtIdentityRepository::issue`].
pub const TOKEN_LIFETIME: Duration = Duration::hours(24);

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: UserId,
    role: Role,
    exp: i64,
}

/// HS256 tokens signed with the `JWT_SECRET` shared with the login service.
#[derive(Clone)]
pub struct JwtIdentityRepository {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtIdentityRepository {
    pub fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self::with_secret(&env(JWT_SECRET)?))
    }

    pub fn with_secret(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(
        &self,
        identity: &Identity,
        now: OffsetDateTime,
    ) -> error_stack::Result<AccessToken, KernelError> {
        let claims = Claims {
            id: identity.user_id().clone(),
            role: *identity.role(),
            exp: (now + TOKEN_LIFETIME).unix_timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|error| Report::new(error).change_context(KernelError::Internal))
    }
}

impl IdentityQuery for JwtIdentityRepository {
    fn find_by_token(&self, token: &AccessToken) -> error_stack::Result<Identity, KernelError> {
        let data = jsonwebtoken::decode::<Claims>(token.as_ref(), &self.decoding, &self.validation)
            .map_err(rejected)?;
        Ok(Identity::new(data.claims.id, data.claims.role))
    }
}

fn rejected(error: JwtError) -> Report<KernelError> {
    let message = match error.kind() {
        ErrorKind::ExpiredSignature => EXPIRED,
        _ => INVALID,
    };
    tracing::debug!("token refused: {error}");
    Report::new(error)
        .change_context(KernelError::Unauthenticated)
        .attach_printable(ErrorMessage::new(message))
}
