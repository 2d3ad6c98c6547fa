// # Reload Trigger Implementations

pub mod command;
pub mod noop;

pub use command::CommandReload;
pub use noop::NoopReload;
