pub mod board;
pub mod interval;
pub mod issue;
pub mod prediction;
pub mod ratio;
pub mod throughput;
pub mod ticket_target;
