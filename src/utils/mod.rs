pub mod intake;
pub mod normalize;
pub mod variations;

pub use intake::*;
pub use normalize::*;
pub use variations::*;
