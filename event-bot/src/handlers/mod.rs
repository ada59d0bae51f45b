//! Bot handlers, registered in this order: `/start` command first, then the plain-text
//! acknowledgement.

mod message_handler;
mod start_handler;

pub use message_handler::{MessageAckHandler, ACK_REPLY};
pub use start_handler::{StartCommandHandler, START_COMMAND, START_REPLY};
