mod file;
mod summary;
mod chat;
mod upload;

pub use file::*;
pub use summary::*;
pub use chat::*;
pub use upload::*;
