pub mod config;
pub mod db;
pub mod document;
pub mod observability;
pub mod session;

pub use config::Config;
pub use document::{FileRenderer, Format};
pub use session::{FAILURE_MESSAGE, Form, Notice, Session};
