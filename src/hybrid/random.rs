/// Source of uniform draws in `[0, 1)` for provider selection.
pub trait RandomSource: Send + Sync {
    fn draw(&self) -> f64;
}

/// Thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn draw(&self) -> f64 {
        rand::random::<f64>()
    }
}

/// Always returns the same draw.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

#[cfg(any(test, feature = "mock"))]
impl RandomSource for FixedRandom {
    fn draw(&self) -> f64 {
        self.0
    }
}
