// handlers/protected/messages.rs - posting to and reading from chatrooms

use axum::extract::{Extension, Path};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::chats::{ensure_chat_exists_at, MALFORMED_CHAT_ID};
use crate::config;
use crate::database::models::Message;
use crate::database::DatabaseManager;
use crate::error::{stage, ApiError};
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthMember};
use crate::push::{self, PushPayload};
use crate::services::{ChatService, MessageService, PushTokenService};
use crate::validation::{id_from_json, is_string_provided, parse_id, IdField};

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub chatid: Option<Value>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessagePage {
    pub chatid: i32,
    #[serde(rename = "rowCount")]
    pub row_count: usize,
    pub rows: Vec<Message>,
}

/// POST /messages - store a message and push it to every member's device
pub async fn send(
    Extension(member): Extension<AuthMember>,
    ApiJson(body): ApiJson<SendMessageRequest>,
) -> ApiResult<Value> {
    let chatid = id_from_json(body.chatid.as_ref());
    if matches!(chatid, Err(IdField::Missing)) || !is_string_provided(body.message.as_deref()) {
        return Err(ApiError::missing_info());
    }
    let chatid = chatid.map_err(|_| ApiError::bad_request(MALFORMED_CHAT_ID))?;
    let text = body.message.unwrap_or_default();

    let pool = DatabaseManager::pool().await?;
    let chats = ChatService::new(pool.clone());

    ensure_chat_exists_at(&chats, chatid, stage::CHAT_ID_CHECK).await?;

    if !chats
        .is_member(chatid, member.memberid)
        .await
        .map_err(ApiError::sql(stage::MEMBER_IN_CHAT_CHECK))?
    {
        return Err(ApiError::bad_request("User Not In Chat"));
    }

    let stored = MessageService::new(pool.clone(), config::config().chat.display_time_zone.clone())
        .insert(chatid, member.memberid, &text)
        .await
        .map_err(ApiError::sql(stage::INSERT))?;

    let tokens = PushTokenService::new(pool)
        .tokens_for_chat(chatid)
        .await
        .map_err(ApiError::sql(stage::SELECT_PUSH_TOKEN))?;

    tracing::info!(
        "Member {} posted message {} to chat {} ({} device(s) to notify)",
        member.email,
        stored.messageid,
        chatid,
        tokens.len()
    );
    push::client().dispatch(tokens, PushPayload::message(stored));

    Ok(ApiResponse::ok())
}

/// GET /messages/:chatid - newest page of a chatroom's history
pub async fn latest(
    Extension(member): Extension<AuthMember>,
    Path(chatid): Path<String>,
) -> ApiResult<MessagePage> {
    page(member, &chatid, None).await
}

/// GET /messages/:chatid/:messageid - the page of messages older than `messageid`
pub async fn before(
    Extension(member): Extension<AuthMember>,
    Path((chatid, messageid)): Path<(String, String)>,
) -> ApiResult<MessagePage> {
    page(member, &chatid, Some(&messageid)).await
}

async fn page(member: AuthMember, chatid: &str, before: Option<&str>) -> ApiResult<MessagePage> {
    let chatid = parse_id(chatid).ok_or_else(|| ApiError::bad_request(MALFORMED_CHAT_ID))?;
    let before = match before {
        Some(raw) => parse_id(raw)
            .ok_or_else(|| ApiError::bad_request("Malformed Parameter, Message ID Must Be A Number"))?,
        None => i32::MAX,
    };

    let pool = DatabaseManager::pool().await?;
    let chats = ChatService::new(pool.clone());

    ensure_chat_exists_at(&chats, chatid, stage::GENERIC).await?;

    if !chats
        .is_member(chatid, member.memberid)
        .await
        .map_err(ApiError::sql(stage::GENERIC))?
    {
        return Err(ApiError::bad_request("User Not In Chat"));
    }

    let settings = &config::config().chat;
    let rows = MessageService::new(pool, settings.display_time_zone.clone())
        .page(chatid, before, settings.message_page_size)
        .await
        .map_err(ApiError::sql(stage::GENERIC))?;

    Ok(ApiResponse::success(MessagePage {
        chatid,
        row_count: rows.len(),
        rows,
    }))
}
