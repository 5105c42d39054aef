pub mod state_sync;

pub use state_sync::*;
