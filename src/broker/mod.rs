pub mod engine;
pub mod message;
pub mod queue;
pub mod topic;

pub use engine::Broker;
pub use message::Message;
pub use topic::Topic;
