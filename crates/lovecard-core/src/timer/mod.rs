mod anniversary;
mod countdown;
mod instant;

pub use anniversary::{elapsed_between, AnniversaryEngine, Elapsed};
pub use countdown::{
    CountdownEngine, CountdownState, Remaining, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE,
    MS_PER_SECOND, TICK_INTERVAL_MS,
};
pub use instant::{instant_or_now, local_now, pad2, parse_instant};
