pub mod entry;
pub mod naming;

pub use entry::*;
pub use naming::*;
