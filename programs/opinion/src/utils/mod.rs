pub mod packed;
pub mod reward;
pub mod rounds;

pub use packed::*;
pub use reward::*;
pub use rounds::*;
