//! Identity middleware.
//!
//! A bearer token wins over a guest session header. Requests carrying
//! neither are rejected.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use sillage_app::{
    auth::AuthServiceError,
    domain::identity::{Identity, SessionId},
};
use tracing::error;

use crate::{
    errors::{ApiError, ErrorCode},
    extensions::*,
    state::State,
};

pub(crate) const SESSION_ID_HEADER: &str = "x-session-id";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match resolve(req, depot).await {
        Ok(identity) => {
            depot.insert_identity(identity);

            ctrl.call_next(req, depot, res).await;
        }
        Err(api_error) => {
            res.render(api_error);

            ctrl.skip_rest();
        }
    }
}

async fn resolve(req: &Request, depot: &Depot) -> Result<Identity, ApiError> {
    if req.headers().contains_key(AUTHORIZATION) {
        let Some(token) = extract_bearer_token(req) else {
            return Err(ApiError::new(
                ErrorCode::InvalidToken,
                "Malformed Authorization header",
            ));
        };

        let state = depot.obtain_or_500::<Arc<State>>()?;

        return match state.app.auth.authenticate_bearer(token).await {
            Ok(user) => Ok(Identity::User(user)),
            Err(AuthServiceError::Malformed | AuthServiceError::NotFound) => {
                Err(ApiError::new(ErrorCode::InvalidToken, "Invalid API token"))
            }
            Err(AuthServiceError::Sql(source)) => {
                error!("failed to validate api token: {source}");

                Err(ApiError::internal())
            }
        };
    }

    let Some(raw) = req.headers().get(SESSION_ID_HEADER) else {
        return Err(ApiError::new(
            ErrorCode::AuthenticationRequired,
            "Authentication required",
        ));
    };

    let raw = raw
        .to_str()
        .map_err(|_ignored| ApiError::validation("X-Session-Id must be visible ASCII"))?;

    SessionId::parse(raw)
        .map(Identity::GuestSession)
        .map_err(|source| ApiError::validation(format!("invalid X-Session-Id: {source}")))
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
