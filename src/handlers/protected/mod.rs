// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Route groups: /chats, /messages, /contacts, /auth (push tokens),
// /locations and /weather. The router applies `jwt_auth_middleware`
// to each group before any of these run.

pub mod chats;
pub mod contacts;
pub mod locations;
pub mod messages;
pub mod push_tokens;
pub mod weather;
