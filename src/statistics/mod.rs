//! Statistics over collected timing samples.
//!
//! Raw per-run durations are noisy: scheduler preemption, frequency
//! transitions, and interrupt storms inject occasional samples far from the
//! true cost of a kernel call. The engine here converts that noise into a
//! stable mean by iterative sigma clipping over a fixed sample set.

mod sigma_clip;

pub use sigma_clip::{sigma_clip, ClipSummary, RoundStats, SampleSet, StatsError};
