// Utils compartidos

pub mod constants;
pub mod format;
pub mod phone;
pub mod storage;

pub use constants::*;
pub use format::*;
pub use phone::*;
pub use storage::*;
