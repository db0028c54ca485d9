mod master;

pub use master::*;
