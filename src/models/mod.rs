pub mod candidate;
pub mod match_result;
pub mod statistics;

pub use candidate::*;
pub use match_result::*;
pub use statistics::*;
