pub mod chat;
pub mod header;
pub mod login;
pub mod upload;
