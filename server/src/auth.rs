use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::RequestPartsExt;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

use kernel::interface::query::{DependOnIdentityQuery, IdentityQuery};
use kernel::prelude::entity::{AccessToken, Identity};
use kernel::KernelError;

use crate::error::ErrorStatus;
use crate::handler::AppModule;

/// Caller resolved from the `Authorization: Bearer` header.
pub struct Authenticated(pub Identity);

#[async_trait]
impl FromRequestParts<AppModule> for Authenticated {
    type Rejection = ErrorStatus;

    async fn from_request_parts(
        parts: &mut Parts,
        module: &AppModule,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                KernelError::Unauthenticated.with_message("Access denied. No token provided.")
            })?;
        let token = AccessToken::new(bearer.token());
        let identity = module.identity_query().find_by_token(&token)?;
        Ok(Self(identity))
    }
}
