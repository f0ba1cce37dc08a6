/// A closed or open range of reals, used for accepted hit distances and
/// channel clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    ///
    /// NaN maps to `min`, so a clamped value is always usable as a channel.
    pub fn clamp(&self, x: f64) -> f64 {
        if x.is_nan() {
            return self.min;
        }
        x.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(1e-6, f64::INFINITY);

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(1e-6));
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(-3.0));

        assert!(interval.surrounds(2e-6));
        assert!(interval.surrounds(1e12));
    }

    #[test]
    fn test_interval_clamp() {
        let interval = Interval::new(0.0, 255.0);

        assert_eq!(interval.clamp(-5.0), 0.0);
        assert_eq!(interval.clamp(0.0), 0.0);
        assert_eq!(interval.clamp(128.5), 128.5);
        assert_eq!(interval.clamp(300.0), 255.0);
        assert_eq!(interval.clamp(f64::NAN), 0.0);
    }
}
