pub mod bot;
pub mod conversations;
pub mod dialogue;
pub mod sessions;

pub use bot::*;
pub use conversations::*;
pub use sessions::*;
