pub mod backup;
pub mod clock;
pub mod context;
pub mod fetch;
pub mod log;
pub mod scheduler;
