mod bot_commands;
mod experience;
mod messenger;
mod reply;
mod session;
mod vacancy;

pub use bot_commands::*;
pub use experience::*;
pub use messenger::*;
pub use reply::*;
pub use session::*;
pub use vacancy::*;
