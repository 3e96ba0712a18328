//! Request-level session resolution
//!
//! `CurrentUser` is installed into request extensions by the auth
//! middleware; `MaybeUser` resolves the session directly and fails open to
//! "no principal" on any error, matching the behaviour of public views.

use std::convert::Infallible;
use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::RequestPartsExt;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

use crate::auth::AuthService;
use crate::models::User;

/// The authenticated principal, present behind the auth middleware
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// The principal if one could be resolved; never rejects the request
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_service = Arc::<AuthService>::from_ref(state);

        let bearer = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .ok();

        let user = match bearer {
            Some(TypedHeader(Authorization(bearer))) => {
                match auth_service.resolve_session(bearer.token()).await {
                    Ok(user) => Some(user),
                    Err(e) => {
                        tracing::debug!(error = %e, "session resolution failed; treating as anonymous");
                        None
                    }
                }
            }
            None => None,
        };

        Ok(MaybeUser(user))
    }
}
