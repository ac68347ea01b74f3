// handlers/mod.rs - Route handlers by security tier
//
// Public (no auth) and Protected (member JWT). Every protected handler
// receives the caller as `Extension<AuthMember>`.
pub mod protected;
pub mod public;
