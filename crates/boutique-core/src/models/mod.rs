pub mod message;
pub mod session;

pub use message::{DeliveryStatus, Message, Sender};
pub use session::{ChatSession, UserInfo};
