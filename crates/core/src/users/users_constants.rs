/// Cash balance every freshly registered user starts with.
pub const STARTING_CASH: f64 = 10_000.0;
