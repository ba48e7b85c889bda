pub mod dequeue;
pub mod enqueue;
pub mod notify;
