mod logs;
mod store;
mod tunnel;

pub use logs::*;
pub use store::*;
pub use tunnel::*;
