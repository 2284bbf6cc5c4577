pub mod commands;
pub mod events;
pub mod types;

pub use commands::ChainCommand;
pub use events::ChainEvent;
pub use types::Wave;
