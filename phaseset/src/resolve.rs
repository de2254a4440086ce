//! Resolution of a phase selection into per-geometry visibility
//!
//! Displaying a phase means showing, for every geometry, whichever side(s) of
//! its zero level appear in at least one sign combination mapped to that
//! phase.  The per-geometry result is a [`Visibility`]; the functions in this
//! module build a `Vec<Visibility>` indexed by geometry.
use crate::{
    phase::{PhaseId, PhaseTable},
    sign::{Sign, SignVector},
};

/// Render filter for a single geometry
///
/// Visibility states form a small join-semilattice, with [`Hidden`] at the
/// bottom and [`Both`] at the top; see [`Visibility::merge`].
///
/// [`Hidden`]: Visibility::Hidden
/// [`Both`]: Visibility::Both
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Visibility {
    /// Nothing is drawn
    #[default]
    Hidden,
    /// Only the `>= 0` side is drawn
    PositiveOnly,
    /// Only the `<= 0` side is drawn
    NegativeOnly,
    /// Both sides are drawn
    Both,
}

impl Visibility {
    /// Folds one more sign into this state
    ///
    /// The merge is commutative and [`Both`](Visibility::Both) is absorbing, so
    /// the result of folding a set of sign vectors doesn't depend on order.
    pub fn merge(self, sign: Sign) -> Self {
        match (self, sign) {
            (Visibility::Hidden, Sign::Positive) => Visibility::PositiveOnly,
            (Visibility::Hidden, Sign::Negative) => Visibility::NegativeOnly,
            (Visibility::PositiveOnly, Sign::Positive) => {
                Visibility::PositiveOnly
            }
            (Visibility::NegativeOnly, Sign::Negative) => {
                Visibility::NegativeOnly
            }
            (Visibility::PositiveOnly, Sign::Negative)
            | (Visibility::NegativeOnly, Sign::Positive)
            | (Visibility::Both, _) => Visibility::Both,
        }
    }

    /// Checks whether a grid column with the given field values is drawable
    ///
    /// Zero counts as both positive and negative here, so the zero level is
    /// drawn from either side.  `NaN` is only drawable under
    /// [`Both`](Visibility::Both).
    #[inline]
    pub fn is_drawable(self, y0: f32, y1: f32) -> bool {
        match self {
            Visibility::Hidden => false,
            Visibility::Both => true,
            Visibility::PositiveOnly => y0 >= 0.0 && y1 >= 0.0,
            Visibility::NegativeOnly => y0 <= 0.0 && y1 <= 0.0,
        }
    }

    /// Checks whether this state is [`Hidden`](Visibility::Hidden)
    pub fn is_hidden(self) -> bool {
        self == Visibility::Hidden
    }
}

/// Folds a set of sign-vector indices into per-geometry visibility
///
/// Each index is decoded with `width = num_geometries`; geometries start out
/// hidden and accumulate the signs that appear.
pub fn fold_indices<I>(indices: I, num_geometries: usize) -> Vec<Visibility>
where
    I: IntoIterator<Item = usize>,
{
    let mut out = vec![Visibility::Hidden; num_geometries];
    for i in indices {
        let v = SignVector::decode(i, num_geometries);
        for (state, sign) in out.iter_mut().zip(v.iter()) {
            *state = state.merge(sign);
        }
    }
    out
}

/// Computes the visibility needed to display a single phase
///
/// ```
/// # use phaseset::{phase::PhaseTable, resolve::*};
/// let mut table = PhaseTable::new();
/// table.reset(2);
/// let v = visibility_for_phase(&table, 2, 2);
/// assert_eq!(v, [Visibility::PositiveOnly, Visibility::NegativeOnly]);
/// ```
pub fn visibility_for_phase(
    table: &PhaseTable,
    phase: PhaseId,
    num_geometries: usize,
) -> Vec<Visibility> {
    fold_indices(table.phases_of(phase), num_geometries)
}

/// Shows both sides of geometry `g` and hides everything else
///
/// This doesn't consult the phase table.  If `g` is out of range, every
/// geometry is hidden.
pub fn visibility_for_single_geometry(
    g: usize,
    num_geometries: usize,
) -> Vec<Visibility> {
    (0..num_geometries)
        .map(|i| {
            if i == g {
                Visibility::Both
            } else {
                Visibility::Hidden
            }
        })
        .collect()
}

/// Shows both sides of every geometry
pub fn visibility_show_all(num_geometries: usize) -> Vec<Visibility> {
    vec![Visibility::Both; num_geometries]
}

/// Restricts every visible geometry to one side, leaving hidden ones alone
pub fn force_sign(states: &mut [Visibility], sign: Sign) {
    let forced = match sign {
        Sign::Positive => Visibility::PositiveOnly,
        Sign::Negative => Visibility::NegativeOnly,
    };
    for s in states.iter_mut().filter(|s| !s.is_hidden()) {
        *s = forced;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{SeedableRng, seq::SliceRandom};
    use strum::IntoEnumIterator;

    #[test]
    fn merge_lattice() {
        use Visibility::*;
        assert_eq!(Hidden.merge(Sign::Positive), PositiveOnly);
        assert_eq!(Hidden.merge(Sign::Negative), NegativeOnly);
        assert_eq!(PositiveOnly.merge(Sign::Positive), PositiveOnly);
        assert_eq!(PositiveOnly.merge(Sign::Negative), Both);
        assert_eq!(NegativeOnly.merge(Sign::Negative), NegativeOnly);
        assert_eq!(NegativeOnly.merge(Sign::Positive), Both);
        for s in Sign::iter() {
            assert_eq!(Both.merge(s), Both);
        }
    }

    #[test]
    fn merge_commutes() {
        for v in Visibility::iter() {
            for a in Sign::iter() {
                for b in Sign::iter() {
                    assert_eq!(v.merge(a).merge(b), v.merge(b).merge(a));
                }
            }
        }
    }

    #[test]
    fn drawable() {
        use Visibility::*;
        assert!(!Hidden.is_drawable(1.0, 1.0));
        assert!(Both.is_drawable(-1.0, 1.0));
        assert!(Both.is_drawable(f32::NAN, 1.0));
        assert!(PositiveOnly.is_drawable(0.0, 2.0));
        assert!(!PositiveOnly.is_drawable(-0.1, 2.0));
        assert!(!PositiveOnly.is_drawable(f32::NAN, 2.0));
        assert!(NegativeOnly.is_drawable(0.0, -2.0));
        assert!(!NegativeOnly.is_drawable(-1.0, 0.5));
    }

    #[test]
    fn phase_two_of_identity() {
        let mut table = PhaseTable::new();
        table.reset(2);
        assert_eq!(
            visibility_for_phase(&table, 2, 2),
            [Visibility::PositiveOnly, Visibility::NegativeOnly]
        );
    }

    #[test]
    fn merged_phases() {
        let mut table = PhaseTable::new();
        table.reset(2);
        // Phase 1 covers `-+` and `++`: geometry 0 on both sides, geometry 1
        // only on its positive side
        table.assign_str("0 1 0 1").unwrap();
        assert_eq!(
            visibility_for_phase(&table, 1, 2),
            [Visibility::Both, Visibility::PositiveOnly]
        );
        assert_eq!(
            visibility_for_phase(&table, 0, 2),
            [Visibility::Both, Visibility::NegativeOnly]
        );
        assert_eq!(
            visibility_for_phase(&table, 5, 2),
            [Visibility::Hidden, Visibility::Hidden]
        );
    }

    #[test]
    fn fold_order_is_irrelevant() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
        let mut table = PhaseTable::new();
        table.reset(4);
        let values: Vec<_> = (0..16).map(|i| Some((i * 7 + 3) % 5)).collect();
        table.assign(&values).unwrap();
        for phase in 0..5 {
            let expected = visibility_for_phase(&table, phase, 4);
            let mut indices = table.phases_of(phase);
            for _ in 0..8 {
                indices.shuffle(&mut rng);
                assert_eq!(fold_indices(indices.iter().copied(), 4), expected);
            }
        }
    }

    #[test]
    fn single_and_all() {
        assert_eq!(
            visibility_for_single_geometry(1, 3),
            [Visibility::Hidden, Visibility::Both, Visibility::Hidden]
        );
        assert_eq!(
            visibility_for_single_geometry(5, 2),
            [Visibility::Hidden, Visibility::Hidden]
        );
        assert_eq!(visibility_show_all(2), [Visibility::Both; 2]);
        assert!(visibility_show_all(0).is_empty());
    }

    #[test]
    fn forced_sign() {
        let mut table = PhaseTable::new();
        table.reset(3);
        table.assign_str("0 1 1 2 2 1 0 0").unwrap();
        for phase in 0..3 {
            let base = visibility_for_phase(&table, phase, 3);
            for sign in Sign::iter() {
                let mut v = base.clone();
                force_sign(&mut v, sign);
                for (before, after) in base.iter().zip(&v) {
                    if before.is_hidden() {
                        assert!(after.is_hidden());
                    } else {
                        let expected = match sign {
                            Sign::Positive => Visibility::PositiveOnly,
                            Sign::Negative => Visibility::NegativeOnly,
                        };
                        assert_eq!(*after, expected);
                    }
                }
            }
        }

        let mut v = vec![Visibility::Hidden, Visibility::Both];
        force_sign(&mut v, Sign::Negative);
        assert_eq!(v, [Visibility::Hidden, Visibility::NegativeOnly]);
    }
}
