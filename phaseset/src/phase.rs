//! Mapping from sign combinations to material phases
use crate::{Error, MAX_GEOMETRIES, TABLE_CAPACITY, sign::SignVector};
use log::{debug, warn};

/// Material phase identifier
pub type PhaseId = usize;

/// Fixed-capacity mapping from sign-vector index to phase
///
/// The table has [`TABLE_CAPACITY`] slots, but only the first `2^width` are
/// meaningful, where `width` is the number of active geometries.  Slots beyond
/// that range are always unassigned; they are never carried over from a
/// previous geometry count.
///
/// ```
/// # use phaseset::phase::PhaseTable;
/// let mut table = PhaseTable::new();
/// table.reset(2);
/// assert_eq!(table.phases_of(2), [2]);
///
/// table.assign(&[Some(0), Some(1), Some(1), Some(0)])?;
/// assert_eq!(table.phases_of(1), [1, 2]);
/// assert!(table.phases_of(5).is_empty());
/// # Ok::<(), phaseset::Error>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PhaseTable {
    entries: Box<[Option<PhaseId>]>,
    width: usize,
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseTable {
    /// Builds a table with zero active geometries
    ///
    /// The single meaningful index (`0`) maps to phase `0`.
    pub fn new() -> Self {
        let mut out = Self {
            entries: vec![None; TABLE_CAPACITY].into_boxed_slice(),
            width: 0,
        };
        out.reset(0);
        out
    }

    /// Returns the number of geometries that this table is indexed by
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of meaningful entries (`2^width`)
    pub fn len(&self) -> usize {
        1 << self.width
    }

    /// A table always has at least one meaningful entry
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Reinitializes the table to the identity mapping over `width` geometries
    ///
    /// # Panics
    /// If `width` exceeds [`MAX_GEOMETRIES`]
    pub fn reset(&mut self, width: usize) {
        assert!(width <= MAX_GEOMETRIES, "width {width} is too large");
        let n = 1 << width;
        for (i, e) in self.entries.iter_mut().enumerate() {
            *e = (i < n).then_some(i);
        }
        self.width = width;
        debug!("reset phase table to identity over {width} geometries");
    }

    /// Overwrites every meaningful entry
    ///
    /// `values` must contain exactly `2^width` entries; `None` marks an
    /// unassigned sign combination.  On error, the table is unchanged.
    pub fn assign(&mut self, values: &[Option<PhaseId>]) -> Result<(), Error> {
        let expected = self.len();
        if values.len() != expected {
            warn!(
                "rejecting phase table edit with {} entries (expected {})",
                values.len(),
                expected
            );
            return Err(Error::ArityMismatch {
                expected,
                actual: values.len(),
            });
        }
        self.entries[..expected].copy_from_slice(values);
        Ok(())
    }

    /// Parses and assigns a whitespace or comma-delimited list of phases
    ///
    /// See [`parse`] for how individual tokens are handled.
    pub fn assign_str(&mut self, text: &str) -> Result<(), Error> {
        self.assign(&parse(text))
    }

    /// Looks up the phase of a single sign-vector index
    ///
    /// Returns `None` for unassigned or out-of-range indices.
    pub fn get(&self, index: usize) -> Option<PhaseId> {
        if index < self.len() {
            self.entries[index]
        } else {
            None
        }
    }

    /// Looks up the phase of a sign vector
    pub fn phase_of(&self, v: &SignVector) -> Option<PhaseId> {
        if v.len() == self.width {
            self.get(v.encode())
        } else {
            None
        }
    }

    /// Returns every index (in ascending order) assigned to the given phase
    ///
    /// An unused phase returns an empty list, which is not an error.
    pub fn phases_of(&self, phase: PhaseId) -> Vec<usize> {
        self.entries[..self.len()]
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == Some(phase))
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns a displayable report of the meaningful entries
    pub fn report(&self) -> PhaseReport<'_> {
        PhaseReport(self)
    }
}

/// Parses a whitespace or comma-delimited list of phase identifiers
///
/// Tokens that aren't non-negative integers become unassigned (`None`) rather
/// than being dropped, so the entry count always matches the token count.
///
/// ```
/// # use phaseset::phase::parse;
/// assert_eq!(parse("0, 1 x,-2"), [Some(0), Some(1), None, None]);
/// ```
pub fn parse(text: &str) -> Vec<Option<PhaseId>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect()
}

/// Textual report of a [`PhaseTable`]
///
/// Each line shows an index, the sign of each geometry (geometry 0 first), and
/// the stored phase, with `-` for unassigned entries:
///
/// ```text
/// index  signs  phase
///     0  --     0
///     1  -+     1
///     2  +-     1
///     3  ++     -
/// ```
pub struct PhaseReport<'a>(&'a PhaseTable);

impl std::fmt::Display for PhaseReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.0;
        let w = table.width.max("signs".len());
        writeln!(f, "index  {:<w$}  phase", "signs")?;
        for i in 0..table.len() {
            let glyphs = SignVector::decode(i, table.width).glyphs();
            write!(f, "{i:>5}  {glyphs:<w$}  ")?;
            match table.get(i) {
                Some(p) => writeln!(f, "{p}")?,
                None => writeln!(f, "-")?,
            }
        }
        Ok(())
    }
}
