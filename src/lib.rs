//! Chat relay for the OpenRouter completions API, plus the client-side
//! pieces that turn its event stream back into a conversation.

pub mod catalog;
pub mod client;
pub mod config;
pub mod upstream;
pub mod web;
