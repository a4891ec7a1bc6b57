/// Calendar value support.
///
/// Defines the `Date`, `Time` and `DateTime` types together with the
/// Gregorian calendar arithmetic they rely on: leap-year handling, day
/// counting, clamped month shifts and carry between the date and the clock.
///
/// All three types validate on construction, so a value of one of these
/// types is always a real calendar moment.
pub mod calendar;
/// Duration representation.
///
/// Defines the `Timedelta` type with its seven signed components and the
/// `TimeUnit` enum naming them. Components stay unnormalized until a delta
/// is applied to an anchor; this module also provides the normalization
/// keys used by equality and ordering.
pub mod timedelta;

pub mod core;
