use crate::entity::{AccessToken, Identity};
use crate::KernelError;

/// Resolves the bearer tokens handed out at login.
///
/// Fails with [`KernelError::Unauthenticated`] when the token is forged,
/// malformed or past its expiry.
pub trait IdentityQuery: 'static + Sync + Send {
    fn find_by_token(&self, token: &AccessToken) -> error_stack::Result<Identity, KernelError>;
}

pub trait DependOnIdentityQuery: 'static + Sync + Send {
    type IdentityQuery: IdentityQuery;
    fn identity_query(&self) -> &Self::IdentityQuery;
}
