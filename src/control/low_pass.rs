// First-order exponential low-pass filter

/// Smooths high-frequency noise out of a scalar signal.
///
/// Each call blends the new input with the previous output:
/// `output = gain * prev + (1 - gain) * input`. A gain of 0 passes the input
/// through unchanged; gains approaching 1 smooth harder but lag more. The gain
/// is not validated; values outside `[0, 1)` move the filter pole and are the
/// caller's responsibility.
#[derive(Debug, Clone)]
pub struct LowPassFilter {
    gain: f64,
    prev_output: f64,
}

impl LowPassFilter {
    pub fn new(gain: f64) -> Self {
        Self {
            gain,
            prev_output: 0.0,
        }
    }

    /// Filter one sample, updating the retained output
    pub fn filter(&mut self, input: f64) -> f64 {
        let output = self.gain * self.prev_output + (1.0 - self.gain) * input;
        self.prev_output = output;
        output
    }

    /// Clear the retained output back to zero
    pub fn reset(&mut self) {
        self.prev_output = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_gain_passes_through() {
        let mut filter = LowPassFilter::new(0.0);
        assert_eq!(filter.filter(3.5), 3.5);
        assert_eq!(filter.filter(-1.25), -1.25);
        assert_eq!(filter.filter(0.0), 0.0);
    }

    #[test]
    fn test_constant_input_converges_monotonically() {
        let mut filter = LowPassFilter::new(0.8);
        let target = 10.0;
        let mut prev = 0.0;
        for _ in 0..100 {
            let out = filter.filter(target);
            assert!(out > prev, "output should increase toward the input");
            assert!(out <= target, "output should not overshoot a constant input");
            prev = out;
        }
        assert!((target - prev).abs() < 1e-6);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = LowPassFilter::new(0.5);
        filter.filter(8.0);
        filter.reset();
        // After reset the filter behaves as if freshly constructed
        assert_eq!(filter.filter(2.0), 1.0);
    }
}
