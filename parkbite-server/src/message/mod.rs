//! 消息总线
//!
//! 进程内事件广播，见 [`MessageBus`]。

mod bus;

pub use bus::MessageBus;
pub use shared::message::{BusMessage, EventType};
