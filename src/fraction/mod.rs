// Exact fraction rendering for length and percentage widgets.
// Fixed-denominator rounding for tape-measure style output, and exact
// reduction of decimal strings without binary floating-point drift.

pub mod renderer;
pub mod types;


pub use crate::sync::input::parse_fraction;
pub use renderer::{
    gcd, percent_to_fraction, to_fixed_denominator_fraction, to_reduced_fraction,
    to_reduced_fraction_at, ExactDecimal,
};
pub use types::{FractionResult, InchPrecision};
