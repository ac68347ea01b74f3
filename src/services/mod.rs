pub mod chat_service;
pub mod contact_service;
pub mod location_service;
pub mod member_service;
pub mod message_service;
pub mod push_token_service;

pub use chat_service::ChatService;
pub use contact_service::ContactService;
pub use location_service::LocationService;
pub use member_service::MemberService;
pub use message_service::MessageService;
pub use push_token_service::PushTokenService;
