use crate::Error;
use nalgebra::Vector2;

/// Thread pool to use for row-parallel tessellation
#[derive(Copy, Clone)]
pub enum ThreadPool<'a> {
    /// User-provided pool
    Custom(&'a rayon::ThreadPool),
    /// Global Rayon pool
    Global,
}

impl ThreadPool<'_> {
    /// Runs a function across the thread pool
    pub fn run<F: FnOnce() -> V + Send, V: Send>(&self, f: F) -> V {
        match self {
            ThreadPool::Custom(p) => p.install(f),
            ThreadPool::Global => f(),
        }
    }
}

/// Rectangular sampling domain in the horizontal plane
///
/// Vector components are `(x, z)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    /// Lower corner
    pub lower: Vector2<f32>,
    /// Upper corner
    pub upper: Vector2<f32>,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            lower: Vector2::new(-1.0, -1.0),
            upper: Vector2::new(1.0, 1.0),
        }
    }
}

impl Bounds {
    /// Builds a new set of bounds from `[x_lo, x_hi] × [z_lo, z_hi]`
    pub fn new(x: [f32; 2], z: [f32; 2]) -> Self {
        Self {
            lower: Vector2::new(x[0], z[0]),
            upper: Vector2::new(x[1], z[1]),
        }
    }

    /// Checks that both axes are finite and non-empty
    pub fn validate(&self) -> Result<(), Error> {
        for (i, axis) in ['x', 'z'].into_iter().enumerate() {
            let (lower, upper) = (self.lower[i], self.upper[i]);
            if !(lower.is_finite() && upper.is_finite() && lower < upper) {
                return Err(Error::BadBounds { axis, lower, upper });
            }
        }
        Ok(())
    }
}

/// Settings for tessellation
#[derive(Copy, Clone)]
pub struct TessellateSettings<'a> {
    /// Number of samples along each axis (at least 2)
    pub resolution: usize,

    /// Sampling domain
    pub bounds: Bounds,

    /// Thread pool for row-parallel evaluation
    ///
    /// If this is `None`, then tessellation is done in the caller's thread.
    /// Output is identical either way.
    pub threads: Option<ThreadPool<'a>>,
}

impl Default for TessellateSettings<'_> {
    fn default() -> Self {
        Self {
            resolution: 100,
            bounds: Bounds::default(),
            threads: None,
        }
    }
}

impl TessellateSettings<'_> {
    /// Checks that the grid can form at least one strip
    pub fn validate(&self) -> Result<(), Error> {
        if self.resolution < 2 {
            return Err(Error::BadResolution(self.resolution));
        }
        self.bounds.validate()
    }

    /// Returns the sample coordinates along the x axis
    pub fn xs(&self) -> Vec<f32> {
        linspace(self.bounds.lower.x, self.bounds.upper.x, self.resolution)
    }

    /// Returns the sample coordinates along the z axis
    pub fn zs(&self) -> Vec<f32> {
        linspace(self.bounds.lower.y, self.bounds.upper.y, self.resolution)
    }
}

/// Returns `n` evenly spaced samples from `start` to `end` (inclusive)
///
/// `n` must be at least 2.
pub fn linspace(start: f32, end: f32, n: usize) -> Vec<f32> {
    let step = (end - start) / (n - 1) as f32;
    (0..n)
        .map(|i| {
            if i == n - 1 {
                end
            } else {
                start + i as f32 * step
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn linspace_endpoints() {
        assert_eq!(linspace(-1.0, 1.0, 5), [-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(linspace(0.0, 3.0, 2), [0.0, 3.0]);
        let v = linspace(0.0, std::f32::consts::PI, 100);
        assert_eq!(v.len(), 100);
        assert_eq!(v[99], std::f32::consts::PI);
    }

    #[test]
    fn validate() {
        let mut s = TessellateSettings::default();
        assert!(s.validate().is_ok());

        s.resolution = 1;
        assert!(matches!(s.validate(), Err(Error::BadResolution(1))));
        s.resolution = 0;
        assert!(s.validate().is_err());

        s.resolution = 2;
        s.bounds = Bounds::new([1.0, -1.0], [-1.0, 1.0]);
        assert!(matches!(
            s.validate(),
            Err(Error::BadBounds { axis: 'x', .. })
        ));
        s.bounds = Bounds::new([-1.0, 1.0], [0.0, 0.0]);
        assert!(matches!(
            s.validate(),
            Err(Error::BadBounds { axis: 'z', .. })
        ));
        s.bounds = Bounds::new([-1.0, f32::INFINITY], [-1.0, 1.0]);
        assert!(s.validate().is_err());
    }
}
