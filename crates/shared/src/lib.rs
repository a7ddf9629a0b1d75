mod command;
mod identity;

pub use command::*;
pub use identity::*;
