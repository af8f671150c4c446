pub mod api;
pub mod station;
