//! Random delay jitter backed by `rand`.

use colloquy_application::DelayJitter;
use rand::Rng;

/// Uniform jitter drawn from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomJitter;

impl DelayJitter for RandomJitter {
    fn sample(&self, min: f64, max: f64) -> f64 {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}
