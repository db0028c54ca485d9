pub mod api;

mod config;
mod error;
mod files;
mod pages;
mod saved_file;
mod storage;
mod values;

pub use config::*;
pub use error::*;
pub use files::*;
pub use pages::*;
pub use saved_file::*;
pub use storage::*;
pub use values::*;
