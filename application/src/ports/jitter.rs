//! Source of the random factor in response delays.

/// Draws the random multiplier applied to each response delay.
pub trait DelayJitter: Send + Sync {
    /// A value in `[min, max]`.
    fn sample(&self, min: f64, max: f64) -> f64;
}

/// Always returns the same factor (clamped into the requested range).
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl Default for FixedJitter {
    fn default() -> Self {
        Self(1.0)
    }
}

impl DelayJitter for FixedJitter {
    fn sample(&self, min: f64, max: f64) -> f64 {
        self.0.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_jitter_clamps() {
        assert_eq!(FixedJitter(1.0).sample(0.7, 1.3), 1.0);
        assert_eq!(FixedJitter(5.0).sample(0.7, 1.3), 1.3);
        assert_eq!(FixedJitter(0.0).sample(0.7, 1.3), 0.7);
    }
}
