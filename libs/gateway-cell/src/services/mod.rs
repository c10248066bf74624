pub mod actions;
pub mod refresh;
pub mod snapshot;
pub mod source;
