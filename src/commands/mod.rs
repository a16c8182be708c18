mod auth;
mod files;
mod upload;
mod summarize;
mod chat;
mod export;
mod config;

pub use auth::*;
pub use files::*;
pub use upload::*;
pub use summarize::*;
pub use chat::*;
pub use export::*;
pub use config::*;
