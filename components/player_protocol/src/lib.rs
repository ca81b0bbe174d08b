mod command;
mod error;
mod reply;

pub use command::{Command, Tag};
pub use error::{Ack, ProtocolError};
pub use player_primitives::Attributes;
pub use reply::{Greeting, ReplyParser};
