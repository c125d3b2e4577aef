// Open-loop feedforward model: V = kV*v + kA*a + kCos*cos(pos) + kG

/// Stateless feedforward controller for arm and slide mechanisms.
///
/// Computes an open-loop output from the desired trajectory rather than
/// measured error, compensating known dynamics: velocity (`kv`), acceleration
/// (`ka`), gravity on a rotating arm (`kcos`), and constant gravity on a
/// vertical slide (`kg`). `kstatic` is part of the tuning surface for friction
/// compensation on mechanisms that need it.
///
/// `target_pos` is taken in degrees and converted to radians for the cosine
/// term; callers must use the same angular unit across the whole pipeline.
#[derive(Debug, Clone, Copy)]
pub struct FeedforwardController {
    kv: f64,
    ka: f64,
    kstatic: f64,
    kcos: f64,
    kg: f64,
}

impl FeedforwardController {
    pub fn new(kv: f64, ka: f64, kstatic: f64, kcos: f64, kg: f64) -> Self {
        Self {
            kv,
            ka,
            kstatic,
            kcos,
            kg,
        }
    }

    /// Static friction gain, for hosts that add sign-dependent compensation
    pub fn kstatic(&self) -> f64 {
        self.kstatic
    }

    /// Compute the feedforward output. Pure; safe to share across systems.
    pub fn calculate(
        &self,
        target_pos: f64,
        reference_velocity: f64,
        reference_acceleration: f64,
    ) -> f64 {
        self.kv * reference_velocity
            + self.ka * reference_acceleration
            + self.kcos * target_pos.to_radians().cos()
            + self.kg
    }
}
