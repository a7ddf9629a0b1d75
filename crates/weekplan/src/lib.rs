mod model;
mod store;
mod types;

pub use model::*;
pub use store::*;
pub use types::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod sqlite;

        pub use sqlite::*;
    }
}
