pub mod chat;
pub mod index;
pub mod upload;
