// handlers/protected/chats.rs - chatroom creation and membership
//
// Every membership route runs the same guard order: id shape, chat exists,
// member exists, membership state, then the single write.

use axum::extract::{Extension, Path};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::models::{Chat, ChatMember};
use crate::database::DatabaseManager;
use crate::error::{stage, ApiError};
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthMember, OptionalJson};
use crate::services::{ChatService, MemberService};
use crate::validation::{id_from_json, parse_id, provided, IdField};

pub(crate) const MALFORMED_CHAT_ID: &str = "Malformed Parameter, Chat ID Must Be A Number";
const MALFORMED_MEMBER_ID: &str = "Malformed Parameter, Member ID Must Be A Number";

#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatCreated {
    pub chatid: i32,
    pub chatname: String,
}

#[derive(Debug, Serialize)]
pub struct ChatList {
    pub chats: Vec<Chat>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AddMemberRequest {
    /// Member to add; the caller when absent
    pub memberid: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ChatRoster {
    pub count: usize,
    pub users: Vec<ChatMember>,
}

/// POST /chats - create a chatroom and join it
pub async fn create(
    Extension(member): Extension<AuthMember>,
    ApiJson(body): ApiJson<CreateChatRequest>,
) -> ApiResult<ChatCreated> {
    let name = provided(body.name).ok_or_else(ApiError::missing_info)?;

    let pool = DatabaseManager::pool().await?;
    let chat = ChatService::new(pool)
        .create(&name, member.memberid)
        .await
        .map_err(ApiError::sql(stage::GENERIC))?;

    tracing::info!("Member {} created chat {} ({})", member.memberid, chat.chatid, chat.name);

    Ok(ApiResponse::success(ChatCreated {
        chatid: chat.chatid,
        chatname: chat.name,
    }))
}

/// GET /chats - chatrooms the caller belongs to
pub async fn list(Extension(member): Extension<AuthMember>) -> ApiResult<ChatList> {
    let pool = DatabaseManager::pool().await?;
    let chats = ChatService::new(pool)
        .list_for_member(member.memberid)
        .await
        .map_err(ApiError::sql(stage::GENERIC))?;

    Ok(ApiResponse::success(ChatList { chats }))
}

/// POST /chats/:chatid - add a member (the caller by default) to a chatroom
pub async fn add_member(
    Extension(member): Extension<AuthMember>,
    Path(chatid): Path<String>,
    OptionalJson(body): OptionalJson<AddMemberRequest>,
) -> ApiResult<Value> {
    let chatid = parse_id(&chatid).ok_or_else(|| ApiError::bad_request(MALFORMED_CHAT_ID))?;
    let body = body.unwrap_or_default();
    let target = match id_from_json(body.memberid.as_ref()) {
        Ok(id) => id,
        Err(IdField::Missing) => member.memberid,
        Err(IdField::Malformed) => return Err(ApiError::bad_request(MALFORMED_MEMBER_ID)),
    };

    let pool = DatabaseManager::pool().await?;
    let chats = ChatService::new(pool.clone());

    ensure_chat_exists(&chats, chatid).await?;

    if !MemberService::new(pool).exists(target).await.map_err(ApiError::sql(stage::GENERIC))? {
        return Err(ApiError::not_found("User Not Found"));
    }

    if chats.is_member(chatid, target).await.map_err(ApiError::sql(stage::GENERIC))? {
        return Err(ApiError::bad_request("User Already Exists In Chat Room"));
    }

    chats.add_member(chatid, target).await.map_err(ApiError::sql(stage::INSERT))?;
    tracing::info!("Member {} added member {} to chat {}", member.memberid, target, chatid);

    Ok(ApiResponse::ok())
}

/// GET /chats/:chatid - list a chatroom's members
pub async fn members(
    Extension(_member): Extension<AuthMember>,
    Path(chatid): Path<String>,
) -> ApiResult<ChatRoster> {
    let chatid = parse_id(&chatid).ok_or_else(|| ApiError::bad_request(MALFORMED_CHAT_ID))?;

    let pool = DatabaseManager::pool().await?;
    let chats = ChatService::new(pool);

    ensure_chat_exists(&chats, chatid).await?;

    let users = chats.members(chatid).await.map_err(ApiError::sql(stage::GENERIC))?;

    Ok(ApiResponse::success(ChatRoster {
        count: users.len(),
        users,
    }))
}

/// DELETE /chats/:chatid/:memberid - remove a member from a chatroom
pub async fn remove_member(
    Extension(member): Extension<AuthMember>,
    Path((chatid, memberid)): Path<(String, String)>,
) -> ApiResult<Value> {
    let chatid = parse_id(&chatid).ok_or_else(|| ApiError::bad_request(MALFORMED_CHAT_ID))?;
    let target = parse_id(&memberid).ok_or_else(|| ApiError::bad_request(MALFORMED_MEMBER_ID))?;

    let pool = DatabaseManager::pool().await?;
    let chats = ChatService::new(pool.clone());

    ensure_chat_exists(&chats, chatid).await?;

    if !MemberService::new(pool).exists(target).await.map_err(ApiError::sql(stage::GENERIC))? {
        return Err(ApiError::not_found("User Not Found"));
    }

    if !chats.is_member(chatid, target).await.map_err(ApiError::sql(stage::GENERIC))? {
        return Err(ApiError::bad_request("User Not In Chat"));
    }

    chats.remove_member(chatid, target).await.map_err(ApiError::sql(stage::DELETE))?;
    tracing::info!("Member {} removed member {} from chat {}", member.memberid, target, chatid);

    Ok(ApiResponse::ok())
}

pub(crate) async fn ensure_chat_exists(chats: &ChatService, chatid: i32) -> Result<(), ApiError> {
    ensure_chat_exists_at(chats, chatid, stage::GENERIC).await
}

pub(crate) async fn ensure_chat_exists_at(
    chats: &ChatService,
    chatid: i32,
    stage: &'static str,
) -> Result<(), ApiError> {
    if chats.exists(chatid).await.map_err(ApiError::sql(stage))? {
        Ok(())
    } else {
        Err(ApiError::not_found("Chat ID Not Found"))
    }
}
