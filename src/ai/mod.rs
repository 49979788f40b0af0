/// AI assistant used by `aura ask` and `aura git commit`

pub mod client;

pub use client::{clean_commit_message, compose_question, ChatClient, Message};
