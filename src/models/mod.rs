pub mod request;
pub mod source;

pub use request::*;
pub use source::*;
