//! Owned state for a set of geometries, their phase table, and a selection
//!
//! A [`Scene`] is the single owner of everything the host UI edits between
//! frames.  All mutation goes through its methods, each of which either
//! succeeds or returns an error without changing anything.
use crate::{
    Error, MAX_GEOMETRIES, ScalarField,
    phase::{PhaseId, PhaseReport, PhaseTable},
    resolve::{self, Visibility},
    sign::{Sign, SignVector},
    tessellate::{Strip, TessellateSettings, tessellate},
};
use arrayvec::ArrayVec;
use log::{debug, warn};

/// Flat RGB colors for each geometry index
pub const PALETTE: [[f32; 3]; MAX_GEOMETRIES] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.5, 0.5, 0.5],
    [1.0, 0.5, 0.0],
    [0.5, 0.0, 0.5],
];

/// A single level-set geometry
///
/// The field may be unassigned; such a geometry is never drawn.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    field: Option<ScalarField>,
}

impl Geometry {
    /// Returns the geometry's field, if one has been assigned
    pub fn field(&self) -> Option<&ScalarField> {
        self.field.as_ref()
    }
}

/// What the user has chosen to look at
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Selection {
    /// Both sides of every geometry
    #[default]
    All,
    /// Every region assigned to a phase
    Phase(PhaseId),
    /// Both sides of one geometry, independent of the phase table
    Geometry(usize),
}

/// Strip tagged with its source geometry and display color
#[derive(Clone, Debug, PartialEq)]
pub struct DrawStrip {
    /// Index of the geometry that produced this strip
    pub geometry: usize,
    /// Flat RGB color, from [`PALETTE`]
    pub color: [f32; 3],
    /// Strip geometry
    pub strip: Strip,
}

impl DrawStrip {
    /// Writes the strip as text
    ///
    /// The first line is `strip <geometry> <r> <g> <b> <vertex count>`,
    /// followed by one `x y z` line per vertex.
    pub fn write_text<F: std::io::Write>(
        &self,
        out: &mut F,
    ) -> Result<(), Error> {
        let [r, g, b] = self.color;
        writeln!(
            out,
            "strip {} {r} {g} {b} {}",
            self.geometry,
            self.strip.vertices.len()
        )?;
        self.strip.write_text(out)
    }
}

/// Geometries, phase table, and current selection
#[derive(Clone, Debug, Default)]
pub struct Scene {
    geometries: ArrayVec<Geometry, MAX_GEOMETRIES>,
    table: PhaseTable,
    selection: Selection,
    forced: Option<Sign>,
}

impl Scene {
    /// Builds an empty 2D scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an empty scene in the given spatial dimension
    ///
    /// Only 2D level sets are supported; anything else is an error.
    pub fn with_dimension(dim: u8) -> Result<Self, Error> {
        match dim {
            2 => Ok(Self::new()),
            d => Err(Error::UnsupportedDimension(d)),
        }
    }

    /// Returns the number of defined geometries
    pub fn num_geometries(&self) -> usize {
        self.geometries.len()
    }

    /// Returns a defined geometry
    pub fn geometry(&self, g: usize) -> Option<&Geometry> {
        self.geometries.get(g)
    }

    /// Returns the phase table
    pub fn table(&self) -> &PhaseTable {
        &self.table
    }

    /// Returns the current selection
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Returns the sign to which visible geometries are restricted, if any
    pub fn forced_sign(&self) -> Option<Sign> {
        self.forced
    }

    /// Appends a new geometry, returning its index
    ///
    /// This resets the phase table to the identity mapping, since the number
    /// of sign combinations has changed.
    pub fn define_geometry(
        &mut self,
        field: ScalarField,
    ) -> Result<usize, Error> {
        let g = self.geometries.len();
        let geom = Geometry { field: Some(field) };
        if self.geometries.try_push(geom).is_err() {
            warn!("geometry limit ({MAX_GEOMETRIES}) reached");
            return Err(Error::CapacityExceeded(MAX_GEOMETRIES));
        }
        self.table.reset(self.geometries.len());
        debug!("defined geometry {g}");
        Ok(g)
    }

    /// Replaces the field of an existing geometry
    ///
    /// The phase table is unchanged.
    pub fn assign_field(
        &mut self,
        g: usize,
        field: ScalarField,
    ) -> Result<(), Error> {
        self.geometries
            .get_mut(g)
            .ok_or(Error::BadGeometry(g))?
            .field = Some(field);
        Ok(())
    }

    /// Removes the field of an existing geometry, which will no longer be drawn
    pub fn clear_field(&mut self, g: usize) -> Result<(), Error> {
        self.geometries
            .get_mut(g)
            .ok_or(Error::BadGeometry(g))?
            .field = None;
        Ok(())
    }

    /// Deletes a geometry, shifting higher-indexed geometries down by one
    ///
    /// This resets the phase table and shows every remaining geometry.
    pub fn delete_geometry(&mut self, g: usize) -> Result<(), Error> {
        if g >= self.geometries.len() {
            return Err(Error::BadGeometry(g));
        }
        self.geometries.remove(g);
        self.table.reset(self.geometries.len());
        self.show_all();
        debug!("deleted geometry {g}");
        Ok(())
    }

    /// Overwrites the phase table from a whitespace or comma-delimited list
    ///
    /// The list must have exactly `2^n` entries for `n` geometries; otherwise,
    /// the table is unchanged and the caller should ask again.
    pub fn edit_phase_table(&mut self, text: &str) -> Result<(), Error> {
        self.table.assign_str(text)
    }

    /// Overwrites the phase table (see [`PhaseTable::assign`])
    pub fn assign_phases(
        &mut self,
        values: &[Option<PhaseId>],
    ) -> Result<(), Error> {
        self.table.assign(values)
    }

    /// Shows every region assigned to the given phase
    ///
    /// Selecting a phase that isn't in the table hides everything.
    pub fn select_phase(&mut self, phase: PhaseId) {
        self.select(Selection::Phase(phase));
    }

    /// Shows both sides of a single geometry
    pub fn select_geometry(&mut self, g: usize) -> Result<(), Error> {
        if g >= self.geometries.len() {
            return Err(Error::BadGeometry(g));
        }
        self.select(Selection::Geometry(g));
        Ok(())
    }

    /// Shows both sides of every geometry
    pub fn show_all(&mut self) {
        self.select(Selection::All);
    }

    /// Restricts every visible geometry to one side
    ///
    /// The restriction lasts until the next selection change.
    pub fn force_sign(&mut self, sign: Sign) {
        self.forced = Some(sign);
    }

    fn select(&mut self, selection: Selection) {
        self.selection = selection;
        self.forced = None;
    }

    /// Computes per-geometry visibility for the current selection
    pub fn visibility(&self) -> Vec<Visibility> {
        let n = self.geometries.len();
        let mut out = match self.selection {
            Selection::All => resolve::visibility_show_all(n),
            Selection::Phase(p) => {
                resolve::visibility_for_phase(&self.table, p, n)
            }
            Selection::Geometry(g) => {
                resolve::visibility_for_single_geometry(g, n)
            }
        };
        if let Some(sign) = self.forced {
            resolve::force_sign(&mut out, sign);
        }
        out
    }

    /// Classifies a point against every geometry
    ///
    /// Returns `None` if any geometry has no field.
    pub fn classify(&self, x: f32, z: f32) -> Option<SignVector> {
        let values = self
            .geometries
            .iter()
            .map(|g| g.field().map(|f| f.eval(x, z)))
            .collect::<Option<Vec<f32>>>()?;
        Some(SignVector::from_values(values))
    }

    /// Looks up the phase at a point
    pub fn phase_at(&self, x: f32, z: f32) -> Option<PhaseId> {
        self.table.phase_of(&self.classify(x, z)?)
    }

    /// Returns a textual report of the phase table
    pub fn phase_report(&self) -> PhaseReport<'_> {
        self.table.report()
    }

    /// Tessellates every visible geometry
    ///
    /// Strips are ordered by geometry, then as described in
    /// [`tessellate`](crate::tessellate).  Geometries without a field are
    /// skipped.  A degenerate grid is an error, in which case nothing is drawn.
    pub fn tessellate(
        &self,
        settings: &TessellateSettings,
    ) -> Result<Vec<DrawStrip>, Error> {
        settings.validate()?;
        let mut out = vec![];
        for (g, (geom, vis)) in
            self.geometries.iter().zip(self.visibility()).enumerate()
        {
            if vis.is_hidden() {
                continue;
            }
            let Some(field) = geom.field() else {
                debug!("geometry {g} has no field; skipping");
                continue;
            };
            let strips = tessellate(field, vis, settings)?;
            debug!("geometry {g} ({vis}): {} strips", strips.len());
            out.extend(strips.into_iter().map(|strip| DrawStrip {
                geometry: g,
                color: PALETTE[g],
                strip,
            }));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn plane_x() -> ScalarField {
        ScalarField::new(|x, _z| x)
    }

    fn plane_z() -> ScalarField {
        ScalarField::new(|_x, z| z)
    }

    #[test]
    fn capacity() {
        let mut scene = Scene::new();
        for i in 0..MAX_GEOMETRIES {
            assert_eq!(scene.define_geometry(plane_x()).unwrap(), i);
        }
        assert_eq!(scene.table().width(), MAX_GEOMETRIES);
        let before = scene.table().clone();
        assert!(matches!(
            scene.define_geometry(plane_x()),
            Err(Error::CapacityExceeded(MAX_GEOMETRIES))
        ));
        assert_eq!(scene.num_geometries(), MAX_GEOMETRIES);
        assert_eq!(scene.table(), &before);
    }

    #[test]
    fn define_resets_table() {
        let mut scene = Scene::new();
        scene.define_geometry(plane_x()).unwrap();
        scene.edit_phase_table("1 1").unwrap();
        assert_eq!(scene.table().get(0), Some(1));
        scene.define_geometry(plane_z()).unwrap();
        for i in 0..4 {
            assert_eq!(scene.table().get(i), Some(i));
        }
    }

    #[test]
    fn assign_phases() {
        let mut scene = Scene::new();
        scene.define_geometry(plane_x()).unwrap();
        scene.define_geometry(plane_z()).unwrap();
        scene
            .assign_phases(&[Some(1), None, Some(1), Some(0)])
            .unwrap();
        assert_eq!(scene.table().phases_of(1), [0, 2]);
        assert_eq!(scene.table().get(1), None);

        let before = scene.table().clone();
        assert!(matches!(
            scene.assign_phases(&[Some(0); 3]),
            Err(Error::ArityMismatch {
                expected: 4,
                actual: 3
            })
        ));
        assert_eq!(scene.table(), &before);
    }

    #[test]
    fn bad_geometry() {
        let mut scene = Scene::new();
        scene.define_geometry(plane_x()).unwrap();
        assert!(matches!(
            scene.delete_geometry(1),
            Err(Error::BadGeometry(1))
        ));
        assert!(scene.select_geometry(3).is_err());
        assert!(scene.assign_field(1, plane_z()).is_err());
        assert!(scene.clear_field(2).is_err());
        assert_eq!(scene.num_geometries(), 1);
        assert_eq!(scene.selection(), Selection::All);
    }

    #[test]
    fn dimension() {
        assert!(Scene::with_dimension(2).is_ok());
        assert!(matches!(
            Scene::with_dimension(3),
            Err(Error::UnsupportedDimension(3))
        ));
    }

    #[test]
    fn selection_clears_force() {
        let mut scene = Scene::new();
        scene.define_geometry(plane_x()).unwrap();
        scene.define_geometry(plane_z()).unwrap();
        scene.select_geometry(1).unwrap();
        scene.force_sign(Sign::Negative);
        assert_eq!(
            scene.visibility(),
            [Visibility::Hidden, Visibility::NegativeOnly]
        );
        scene.show_all();
        assert_eq!(scene.forced_sign(), None);
        assert_eq!(scene.visibility(), [Visibility::Both; 2]);
    }

    #[test]
    fn classify() {
        let mut scene = Scene::new();
        scene.define_geometry(plane_x()).unwrap();
        scene.define_geometry(plane_z()).unwrap();
        let v = scene.classify(0.5, -0.5).unwrap();
        assert_eq!(v.glyphs(), "+-");
        assert_eq!(scene.phase_at(0.5, -0.5), Some(2));
        assert_eq!(scene.phase_at(-0.5, -0.5), Some(0));

        scene.edit_phase_table("4 4 5 5").unwrap();
        assert_eq!(scene.phase_at(0.5, 0.5), Some(5));

        scene.clear_field(1).unwrap();
        assert!(scene.classify(0.5, 0.5).is_none());
        assert_eq!(scene.phase_at(0.5, 0.5), None);
    }

    #[test]
    fn palette_by_index() {
        let mut scene = Scene::new();
        scene.define_geometry(plane_x()).unwrap();
        scene.define_geometry(plane_z()).unwrap();
        let settings = TessellateSettings {
            resolution: 4,
            ..Default::default()
        };
        let strips = scene.tessellate(&settings).unwrap();
        assert_eq!(strips.len(), 6);
        for (i, s) in strips.iter().enumerate() {
            let g = i / 3;
            assert_eq!(s.geometry, g);
            assert_eq!(s.color, PALETTE[g]);
        }
    }

    #[test]
    fn draw_strip_text() {
        let mut scene = Scene::new();
        scene.define_geometry(ScalarField::new(|_, _| 0.0)).unwrap();
        let settings = TessellateSettings {
            resolution: 2,
            ..Default::default()
        };
        let strips = scene.tessellate(&settings).unwrap();
        let mut buf = vec![];
        strips[0].write_text(&mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s.lines().next(), Some("strip 0 1 0 0 4"));
        assert_eq!(s.lines().count(), 5);
    }
}
