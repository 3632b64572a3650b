pub mod kafka_listener;
pub mod message;
pub mod redis_listener;
pub mod sqs_listener;
pub mod supervisor;
pub mod worker;

pub use message::TriggerMessage;
pub use supervisor::ListenerSupervisor;
pub use worker::TriggerHandler;
