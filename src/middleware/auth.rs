use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{validate_jwt, Claims};
use crate::error::ApiError;

/// Authenticated member identity extracted from the JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthMember {
    pub memberid: i32,
    pub email: String,
}

impl From<Claims> for AuthMember {
    fn from(claims: Claims) -> Self {
        Self {
            memberid: claims.memberid,
            email: claims.email,
        }
    }
}

/// JWT authentication middleware that validates tokens and injects `AuthMember`
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&headers).ok_or_else(|| ApiError::unauthorized("auth token is not supplied"))?;

    let claims = validate_jwt(&token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        ApiError::forbidden("token is not valid")
    })?;

    let member = AuthMember::from(claims);
    tracing::debug!("Authenticated member {} ({})", member.memberid, member.email);
    request.extensions_mut().insert(member);

    Ok(next.run(request).await)
}

/// Pull the raw token from `x-access-token` or `authorization`, dropping an
/// optional `Bearer ` prefix. Blank values count as absent.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers
        .get("x-access-token")
        .or_else(|| headers.get("authorization"))?
        .to_str()
        .ok()?;

    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
