//! Strip output implementation
use super::Strip;
use std::io::{BufWriter, Write};

impl Strip {
    /// Writes the strip's vertices as text, one `x y z` line per vertex
    pub fn write_text<F: std::io::Write>(
        &self,
        out: &mut F,
    ) -> Result<(), crate::Error> {
        for v in &self.vertices {
            writeln!(out, "{} {} {}", v.x, v.y, v.z)?;
        }
        Ok(())
    }
}

/// Writes a set of strips as a binary STL, one facet per strip triangle
pub fn write_stl<'a, I, F>(strips: I, out: &mut F) -> Result<(), crate::Error>
where
    I: IntoIterator<Item = &'a Strip>,
    I::IntoIter: Clone,
    F: std::io::Write,
{
    let strips = strips.into_iter();
    let count: usize = strips.clone().map(Strip::triangle_count).sum();

    // Lots of small writes, usually to a file
    let mut out = BufWriter::new(out);
    const HEADER: &[u8] = b"This is a binary STL file exported by phaseset";
    static_assertions::const_assert!(HEADER.len() <= 80);
    out.write_all(HEADER)?;
    out.write_all(&[0u8; 80 - HEADER.len()])?;
    out.write_all(&(count as u32).to_le_bytes())?;
    for [a, b, c] in strips.flat_map(Strip::triangles) {
        let normal = (b - a).cross(&(c - a));
        for p in &normal {
            out.write_all(&p.to_le_bytes())?;
        }
        for v in [a, b, c] {
            for p in &v.coords {
                out.write_all(&p.to_le_bytes())?;
            }
        }
        out.write_all(&[0u8; std::mem::size_of::<u16>()])?; // attributes
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        ScalarField,
        resolve::Visibility,
        tessellate::{TessellateSettings, tessellate},
    };

    #[test]
    fn stl_size() {
        let f = ScalarField::new(|x, z| x - z);
        let settings = TessellateSettings {
            resolution: 6,
            ..Default::default()
        };
        let strips = tessellate(&f, Visibility::PositiveOnly, &settings)
            .unwrap();
        let tris: usize = strips.iter().map(Strip::triangle_count).sum();
        assert!(tris > 0);

        let mut buf = vec![];
        write_stl(&strips, &mut buf).unwrap();
        assert_eq!(buf.len(), 80 + 4 + 50 * tris);
        assert_eq!(
            u32::from_le_bytes(buf[80..84].try_into().unwrap()),
            tris as u32
        );
    }

    #[test]
    fn text() {
        let f = ScalarField::new(|_x, _z| 2.0);
        let settings = TessellateSettings {
            resolution: 2,
            ..Default::default()
        };
        let strips = tessellate(&f, Visibility::Both, &settings).unwrap();
        let mut buf = vec![];
        strips[0].write_text(&mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s, "-1 2 -1\n1 2 -1\n-1 2 1\n1 2 1\n");
    }
}
