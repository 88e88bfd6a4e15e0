//! Minimal 1-D cart dynamics.

/// Point mass on a line driven by a horizontal force, integrated with
/// explicit Euler steps.
#[derive(Debug, Clone)]
pub struct CartSimulator {
    mass: f64,
    start: f64,
    /// Current position.
    pub x: f64,
    /// Current velocity.
    pub v: f64,
    /// Elapsed simulated time.
    pub t: f64,
}

impl CartSimulator {
    pub fn new(mass: f64, start: f64) -> Self {
        Self {
            mass,
            start,
            x: start,
            v: 0.0,
            t: 0.0,
        }
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        self.x = self.start;
        self.v = 0.0;
        self.t = 0.0;
    }

    /// Reset with a different initial position.
    pub fn reset_at(&mut self, start: f64) {
        self.start = start;
        self.reset();
    }

    /// Advance one Euler step under force `f`.
    pub fn step(&mut self, f: f64, dt: f64) {
        let a = f / self.mass;
        self.v += a * dt;
        self.x += self.v * dt;
        self.t += dt;
    }
}
