// handlers/protected/contacts.rs - contact requests, verification and removal
//
// A contact starts as an unverified edge (requester -> recipient). It only
// counts as active once the recipient verifies it, which also writes the
// reverse edge. Both parties get a push for every state change.

use axum::extract::{Extension, Path};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;

use crate::database::models::{Contact, Member};
use crate::database::DatabaseManager;
use crate::error::{stage, ApiError};
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthMember, OptionalJson};
use crate::push::{self, PushPayload};
use crate::services::{ContactService, MemberService, PushTokenService};
use crate::validation::{parse_id, provided};

const MALFORMED_MEMBER_ID: &str = "Malformed Parameter, Memberid Must Be A Number";

#[derive(Debug, Serialize)]
pub struct ContactList {
    pub email: String,
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Serialize)]
pub struct RequestList {
    pub requests: Vec<Contact>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ContactRequest {
    pub nickname: Option<String>,
}

/// GET /contacts
pub async fn list(Extension(member): Extension<AuthMember>) -> ApiResult<ContactList> {
    let pool = DatabaseManager::pool().await?;
    let contacts = ContactService::new(pool)
        .list_for_member(member.memberid)
        .await
        .map_err(ApiError::sql(stage::GENERIC))?;

    Ok(ApiResponse::success(ContactList {
        email: member.email,
        contacts,
    }))
}

/// GET /contacts/requests - pending requests addressed to the caller
pub async fn requests(Extension(member): Extension<AuthMember>) -> ApiResult<RequestList> {
    let pool = DatabaseManager::pool().await?;
    let requests = ContactService::new(pool)
        .pending_for_member(member.memberid)
        .await
        .map_err(ApiError::sql(stage::GENERIC))?;

    Ok(ApiResponse::success(RequestList { requests }))
}

/// POST /contacts/:memberid_b - ask another member to become a contact
pub async fn add(
    Extension(member): Extension<AuthMember>,
    Path(memberid_b): Path<String>,
    ApiJson(body): ApiJson<ContactRequest>,
) -> ApiResult<Value> {
    let target = parse_id(&memberid_b).ok_or_else(|| ApiError::bad_request(MALFORMED_MEMBER_ID))?;
    let nickname = provided(body.nickname).ok_or_else(ApiError::missing_info)?;
    if target == member.memberid {
        return Err(ApiError::bad_request("Cannot Add Yourself As A Contact"));
    }

    let pool = DatabaseManager::pool().await?;
    let members = MemberService::new(pool.clone());
    let contacts = ContactService::new(pool.clone());

    let recipient = members
        .find(target)
        .await
        .map_err(ApiError::sql(stage::GENERIC))?
        .ok_or_else(|| ApiError::not_found("User Not Found"))?;

    if contacts
        .find_link(member.memberid, target)
        .await
        .map_err(ApiError::sql(stage::GENERIC))?
        .is_some()
    {
        return Err(ApiError::bad_request("User Already Exists as a Contact"));
    }

    contacts
        .request(member.memberid, target, &nickname)
        .await
        .map_err(ApiError::sql(stage::INSERT))?;
    tracing::info!("Member {} requested contact with {}", member.memberid, target);

    if let Some(requester) = find_caller(&members, &member).await {
        notify(&pool, target, PushPayload::incoming_contact(member.email.clone(), requester)).await;
    }
    notify(&pool, member.memberid, PushPayload::outgoing_contact(member.email.clone(), recipient)).await;

    Ok(ApiResponse::ok())
}

/// PUT /contacts/:memberid_a - accept a pending request from `memberid_a`
pub async fn verify(
    Extension(member): Extension<AuthMember>,
    Path(memberid_a): Path<String>,
    OptionalJson(body): OptionalJson<ContactRequest>,
) -> ApiResult<Value> {
    let requester_id = parse_id(&memberid_a).ok_or_else(|| ApiError::bad_request(MALFORMED_MEMBER_ID))?;
    let body = body.unwrap_or_default();

    let pool = DatabaseManager::pool().await?;
    let members = MemberService::new(pool.clone());
    let contacts = ContactService::new(pool.clone());

    let link = contacts
        .find_link(requester_id, member.memberid)
        .await
        .map_err(ApiError::sql(stage::GENERIC))?
        .ok_or_else(|| ApiError::not_found("Contact Request Not Found"))?;

    if link.verified {
        return Err(ApiError::bad_request("Contact Already Verified"));
    }

    let requester = members
        .find(requester_id)
        .await
        .map_err(ApiError::sql(stage::GENERIC))?
        .ok_or_else(|| ApiError::not_found("User Not Found"))?;

    let nickname = provided(body.nickname).unwrap_or_else(|| requester.username.clone());
    contacts
        .verify(requester_id, member.memberid, &nickname)
        .await
        .map_err(ApiError::sql(stage::INSERT))?;
    tracing::info!("Member {} verified contact request from {}", member.memberid, requester_id);

    if let Some(recipient) = find_caller(&members, &member).await {
        notify(&pool, requester_id, PushPayload::update_contact(recipient)).await;
    }
    notify(&pool, member.memberid, PushPayload::update_contact(requester)).await;

    Ok(ApiResponse::ok())
}

/// DELETE /contacts/:memberid_b - drop the relation in both directions
pub async fn remove(
    Extension(member): Extension<AuthMember>,
    Path(memberid_b): Path<String>,
) -> ApiResult<Value> {
    let other_id = parse_id(&memberid_b).ok_or_else(|| ApiError::bad_request(MALFORMED_MEMBER_ID))?;

    let pool = DatabaseManager::pool().await?;
    let members = MemberService::new(pool.clone());

    let removed = ContactService::new(pool.clone())
        .remove_between(member.memberid, other_id)
        .await
        .map_err(ApiError::sql(stage::DELETE))?;

    if removed == 0 {
        return Err(ApiError::not_found("Contact Not Found"));
    }
    tracing::info!("Member {} removed contact {} ({} edge(s))", member.memberid, other_id, removed);

    if let Some(caller) = find_caller(&members, &member).await {
        notify(&pool, other_id, PushPayload::delete_contact(caller)).await;
    }
    match members.find(other_id).await {
        Ok(Some(other)) => notify(&pool, member.memberid, PushPayload::delete_contact(other)).await,
        Ok(None) => {}
        Err(e) => tracing::warn!("Could not load member {} for delete notification: {}", other_id, e),
    }

    Ok(ApiResponse::ok())
}

/// The caller's member row, used as the `contact` of pushes sent to the other side.
/// The write has already happened, so lookup failures only cost the notification.
async fn find_caller(members: &MemberService, member: &AuthMember) -> Option<Member> {
    match members.find(member.memberid).await {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("Could not load member {} for notification: {}", member.memberid, e);
            None
        }
    }
}

async fn notify(pool: &PgPool, memberid: i32, payload: PushPayload) {
    match PushTokenService::new(pool.clone()).token_for(memberid).await {
        Ok(Some(token)) => push::client().dispatch(vec![token], payload),
        Ok(None) => tracing::debug!("Member {} has no push token, skipping {}", memberid, payload.kind()),
        Err(e) => tracing::warn!("Push token lookup failed for member {}: {}", memberid, e),
    }
}
