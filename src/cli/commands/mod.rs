pub mod fetch;
pub mod validate;

pub use fetch::*;
pub use validate::*;
