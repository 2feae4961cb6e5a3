mod command;
pub mod palette;
pub mod schedule;

pub use command::*;
pub use schedule::*;
