// handlers/protected/push_tokens.rs - device registration for push delivery

use axum::extract::Extension;
use serde::Deserialize;
use serde_json::Value;

use crate::database::DatabaseManager;
use crate::error::{stage, ApiError};
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthMember};
use crate::services::{MemberService, PushTokenService};
use crate::validation::provided;

#[derive(Debug, Deserialize)]
pub struct RegisterTokenRequest {
    pub token: Option<String>,
}

/// PUT /auth - store (or replace) the caller's device token
pub async fn register(
    Extension(member): Extension<AuthMember>,
    ApiJson(body): ApiJson<RegisterTokenRequest>,
) -> ApiResult<Value> {
    let token = provided(body.token).ok_or_else(ApiError::missing_info)?;

    let pool = DatabaseManager::pool().await?;
    ensure_member_exists(&MemberService::new(pool.clone()), member.memberid).await?;

    PushTokenService::new(pool)
        .upsert(member.memberid, &token)
        .await
        .map_err(ApiError::sql(stage::INSERT))?;
    tracing::info!("Registered push token for member {}", member.memberid);

    Ok(ApiResponse::ok())
}

/// DELETE /auth - forget the caller's device token
pub async fn unregister(Extension(member): Extension<AuthMember>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    ensure_member_exists(&MemberService::new(pool.clone()), member.memberid).await?;

    let removed = PushTokenService::new(pool)
        .delete(member.memberid)
        .await
        .map_err(ApiError::sql(stage::DELETE))?;
    tracing::info!("Removed {} push token(s) for member {}", removed, member.memberid);

    Ok(ApiResponse::ok())
}

async fn ensure_member_exists(members: &MemberService, memberid: i32) -> Result<(), ApiError> {
    if members
        .exists(memberid)
        .await
        .map_err(ApiError::sql(stage::MEMBER_CHECK))?
    {
        Ok(())
    } else {
        Err(ApiError::not_found("User Not Found"))
    }
}
