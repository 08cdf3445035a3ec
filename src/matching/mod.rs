pub mod aggregate;
pub mod lenient;
pub mod strict;

pub use aggregate::*;
pub use lenient::*;
pub use strict::*;
