pub mod chat;
pub mod contact;
pub mod location;
pub mod member;
pub mod message;

pub use chat::{Chat, ChatMember};
pub use contact::{Contact, ContactLink};
pub use location::Location;
pub use member::Member;
pub use message::Message;
