//! Per-geometry sign classification and its integer encoding
//!
//! A [`SignVector`] holds one sign per active geometry.  It is encoded as an
//! unsigned integer with **geometry 0 as the most significant bit**, so with
//! three geometries, index `0b100` means "positive side of geometry 0,
//! negative side of geometries 1 and 2".
//!
//! This module is the only place that knows about the bit order; everything
//! else goes through [`SignVector::decode`] and [`SignVector::encode`].
use crate::MAX_GEOMETRIES;
use arrayvec::ArrayVec;

/// Side of a level set
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Sign {
    /// Field value is `>= 0`
    Positive,
    /// Field value is `< 0`
    Negative,
}

impl Sign {
    /// Classifies a field value
    ///
    /// Zero is on the positive side.  `NaN` is on the negative side.
    pub fn of(v: f32) -> Self {
        if v >= 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }

    /// Returns the glyph used in textual reports (`+` or `-`)
    pub fn glyph(self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

impl From<bool> for Sign {
    fn from(positive: bool) -> Self {
        if positive {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// Ordered tuple of signs, one per active geometry
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SignVector(ArrayVec<Sign, MAX_GEOMETRIES>);

impl SignVector {
    /// Decodes the low `width` bits of `index`, most significant bit first
    ///
    /// Bit position `k` (counting from the front) is the sign of geometry `k`;
    /// higher bits of `index` are ignored.
    ///
    /// ```
    /// # use phaseset::sign::{Sign, SignVector};
    /// let v = SignVector::decode(0b10, 2);
    /// assert_eq!(v.as_slice(), [Sign::Positive, Sign::Negative]);
    /// ```
    ///
    /// # Panics
    /// If `width` exceeds [`MAX_GEOMETRIES`]
    pub fn decode(index: usize, width: usize) -> Self {
        assert!(width <= MAX_GEOMETRIES, "width {width} is too large");
        Self(
            (0..width)
                .map(|k| Sign::from((index >> (width - 1 - k)) & 1 == 1))
                .collect(),
        )
    }

    /// Encodes this vector as a table index, most significant bit first
    pub fn encode(&self) -> usize {
        self.0
            .iter()
            .fold(0, |acc, s| (acc << 1) | (*s == Sign::Positive) as usize)
    }

    /// Builds a sign vector by classifying one field value per geometry
    ///
    /// # Panics
    /// If more than [`MAX_GEOMETRIES`] values are provided
    pub fn from_values<I: IntoIterator<Item = f32>>(values: I) -> Self {
        Self(values.into_iter().map(Sign::of).collect())
    }

    /// Returns the number of geometries in this vector
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks whether the vector is empty (no active geometries)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the sign of the given geometry, if it's in range
    pub fn get(&self, g: usize) -> Option<Sign> {
        self.0.get(g).copied()
    }

    /// Returns the signs as a slice, indexed by geometry
    pub fn as_slice(&self) -> &[Sign] {
        &self.0
    }

    /// Iterates over signs in geometry order
    pub fn iter(&self) -> impl Iterator<Item = Sign> + '_ {
        self.0.iter().copied()
    }

    /// Renders the vector as `+` / `-` glyphs, geometry 0 first
    pub fn glyphs(&self) -> String {
        self.0.iter().map(|s| s.glyph()).collect()
    }
}
