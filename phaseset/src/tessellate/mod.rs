//! Sign-aware tessellation of a 2D level set as a height field
//!
//! The field is sampled on a regular `resolution × resolution` grid over the
//! `(x, z)` plane, with the field value as the vertical `y` coordinate.  Each
//! pair of adjacent x-rows is scanned along z; a column (the two samples at
//! `(x_i, z_j)` and `(x_{i+1}, z_j)`) is drawn if
//! [`Visibility::is_drawable`] accepts its values.  Contiguous runs of
//! drawable columns become separate [`Strip`]s, so no strip ever connects a
//! drawable column to one that isn't.
//!
//! Strips are returned in row-major order (increasing x-row, then increasing
//! z), and vertices within a strip alternate between the low-x and high-x
//! sample of each column.
use crate::{Error, ScalarField, resolve::Visibility};
use nalgebra::Point3;
use rayon::prelude::*;

mod config;
mod output;

pub use config::{Bounds, TessellateSettings, ThreadPool, linspace};
pub use output::write_stl;

/// Triangle strip
///
/// Vertices come in `(low-x, high-x)` pairs, one pair per grid column, in
/// increasing z order.  A strip with a single column has no triangles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Strip {
    /// Strip vertices, as `(x, field value, z)`
    pub vertices: Vec<Point3<f32>>,
}

impl Strip {
    /// Iterates over `(low-x, high-x)` vertex pairs
    pub fn pairs(
        &self,
    ) -> impl Iterator<Item = (Point3<f32>, Point3<f32>)> + '_ {
        self.vertices.chunks_exact(2).map(|c| (c[0], c[1]))
    }

    /// Returns the number of triangles in this strip
    pub fn triangle_count(&self) -> usize {
        self.vertices.len().saturating_sub(2)
    }

    /// Iterates over the triangles of the strip
    ///
    /// Every other triangle is flipped so that all of them have the same
    /// winding.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f32>; 3]> + '_ {
        self.vertices.windows(3).enumerate().map(|(i, w)| {
            if i % 2 == 0 {
                [w[0], w[1], w[2]]
            } else {
                [w[1], w[0], w[2]]
            }
        })
    }
}

/// Field values sampled on a regular grid
///
/// Each sample is evaluated exactly once; tessellation of adjacent rows reads
/// from this cache.
#[derive(Clone, Debug)]
struct SampleGrid {
    xs: Vec<f32>,
    zs: Vec<f32>,
    /// Values in x-major order, i.e. `values[i * zs.len() + j]`
    values: Vec<f32>,
}

impl SampleGrid {
    /// Samples a field over the grid described by `settings`
    ///
    /// Settings are not validated here; see [`TessellateSettings::validate`].
    fn sample(field: &ScalarField, settings: &TessellateSettings) -> Self {
        let xs = settings.xs();
        let zs = settings.zs();
        let mut values = vec![0.0; xs.len() * zs.len()];
        let r = |(i, row): (usize, &mut [f32])| {
            for (v, z) in row.iter_mut().zip(&zs) {
                *v = field.eval(xs[i], *z);
            }
        };
        if let Some(threads) = settings.threads {
            threads.run(|| {
                values.par_chunks_mut(zs.len()).enumerate().for_each(r)
            })
        } else {
            values.chunks_mut(zs.len()).enumerate().for_each(r)
        }
        Self { xs, zs, values }
    }

    /// Returns the field value at sample `(i, j)`
    #[inline]
    fn get(&self, i: usize, j: usize) -> f32 {
        self.values[i * self.zs.len() + j]
    }

    /// Returns the vertex at sample `(i, j)`
    #[inline]
    fn vertex(&self, i: usize, j: usize) -> Point3<f32> {
        Point3::new(self.xs[i], self.get(i, j), self.zs[j])
    }

    /// Splits the strip between x-rows `i` and `i + 1` into drawable runs
    fn row_strips(&self, i: usize, visibility: Visibility) -> Vec<Strip> {
        let mut out = vec![];
        let mut open: Option<Strip> = None;
        for j in 0..self.zs.len() {
            if visibility.is_drawable(self.get(i, j), self.get(i + 1, j)) {
                let s = open.get_or_insert_with(Strip::default);
                s.vertices.push(self.vertex(i, j));
                s.vertices.push(self.vertex(i + 1, j));
            } else if let Some(s) = open.take() {
                out.push(s);
            }
        }
        out.extend(open);
        out
    }
}

/// Tessellates the drawable regions of a single field
///
/// Returns an empty list if `visibility` is [`Visibility::Hidden`] (without
/// evaluating the field), or an error if the grid is degenerate.
pub fn tessellate(
    field: &ScalarField,
    visibility: Visibility,
    settings: &TessellateSettings,
) -> Result<Vec<Strip>, Error> {
    settings.validate()?;
    if visibility.is_hidden() {
        return Ok(vec![]);
    }
    let grid = SampleGrid::sample(field, settings);
    let rows = 0..settings.resolution - 1;
    let strips: Vec<Vec<Strip>> = if let Some(threads) = settings.threads {
        threads.run(|| {
            rows.into_par_iter()
                .map(|i| grid.row_strips(i, visibility))
                .collect()
        })
    } else {
        rows.map(|i| grid.row_strips(i, visibility)).collect()
    };
    Ok(strips.into_iter().flatten().collect())
}
