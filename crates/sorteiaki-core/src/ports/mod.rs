mod boundary;

pub use boundary::{ClockPort, FixedClock, SystemClock};
