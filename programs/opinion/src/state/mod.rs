pub mod gates;
pub mod opinion;

pub use gates::*;
pub use opinion::*;
