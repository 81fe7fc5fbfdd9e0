mod aggregate;
mod calculator;
mod multiplier;

pub use aggregate::*;
pub use calculator::*;
pub use multiplier::*;
