pub mod outbox_queue;
pub mod outbox_worker;

pub use outbox_queue::{OutboxQueue, SqlOutboxQueue};
pub use outbox_worker::OutboxProcessor;
