use std::sync::Arc;

/// A compiled scalar function over the horizontal `(x, z)` plane
///
/// The sign of the result classifies a point: `>= 0` is the positive side and
/// `< 0` is the negative side.  Evaluation is a pure function call, so a field
/// may be shared freely between threads and cloned cheaply.
///
/// ```
/// # use phaseset::ScalarField;
/// let circle = ScalarField::new(|x, z| x * x + z * z - 1.0);
/// assert_eq!(circle.eval(0.0, 0.0), -1.0);
/// assert_eq!(circle.eval(1.0, 1.0), 1.0);
/// ```
#[derive(Clone)]
pub struct ScalarField(Arc<dyn Fn(f32, f32) -> f32 + Send + Sync>);

impl ScalarField {
    /// Wraps a function of `(x, z)`
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(f32, f32) -> f32 + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Evaluates the field at the given position
    #[inline]
    pub fn eval(&self, x: f32, z: f32) -> f32 {
        (self.0)(x, z)
    }
}

impl std::fmt::Debug for ScalarField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarField").finish_non_exhaustive()
    }
}
