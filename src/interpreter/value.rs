/// The runtime value type.
///
/// Defines `Value`, the numeric result of an evaluation, together with the
/// promotion rules between integers and reals and numeric ordering.
pub mod core;
/// Text rendering of values.
///
/// Integers print in decimal. Reals print with the shortest digits that
/// round-trip, in fixed notation for moderate magnitudes and scientific
/// notation otherwise.
pub mod repr;
