use fastnoise_lite::{FastNoiseLite, NoiseType};

/// Deterministic 2D height source, seeded once.
pub trait HeightOracle {
    /// Noise value in `[-1, 1]` at `(x, z)`.
    fn sample(&self, x: f32, z: f32) -> f32;
}

/// Seeded OpenSimplex2 noise. Frequency is 1.0, the caller does its own scaling.
pub struct SimplexOracle {
    noise: FastNoiseLite,
}

impl SimplexOracle {
    pub fn new(seed: u32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(1.0));
        SimplexOracle { noise }
    }
}

impl HeightOracle for SimplexOracle {
    fn sample(&self, x: f32, z: f32) -> f32 {
        self.noise.get_noise_2d(x, z).clamp(-1.0, 1.0)
    }
}

impl<F: Fn(f32, f32) -> f32> HeightOracle for F {
    fn sample(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_samples() {
        let a = SimplexOracle::new(42);
        let b = SimplexOracle::new(42);
        for i in 0..64 {
            let (x, z) = (i as f32 * 0.13 - 4.0, i as f32 * -0.07 + 1.5);
            assert_eq!(a.sample(x, z), b.sample(x, z));
        }
    }

    #[test]
    fn test_samples_in_range() {
        let oracle = SimplexOracle::new(7);
        for i in -50..50 {
            let v = oracle.sample(i as f32 * 0.37, i as f32 * 0.11);
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_closure_oracle() {
        let flat = |_: f32, _: f32| 0.25_f32;
        assert_eq!(flat.sample(1.0, 2.0), 0.25);
    }
}
