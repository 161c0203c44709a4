//! Adobe/Resolve `.cube` LUT files.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "LUT Name"
//! LUT_3D_SIZE 33
//! DOMAIN_MIN 0.0 0.0 0.0
//! DOMAIN_MAX 1.0 1.0 1.0
//! 0.0 0.0 0.0
//! ...
//! 1.0 1.0 1.0
//! ```
//!
//! 3D data in the file is red-fastest. [`Lut3D`] keeps nodes blue-fastest,
//! so rows are reordered on read and back on write. `LUT_1D_INPUT_RANGE` /
//! `LUT_3D_INPUT_RANGE` set a uniform domain.
//!
//! # Example
//!
//! ```rust,ignore
//! use vfx_lut::cube;
//!
//! let lut = cube::read_3d("grade.cube")?;
//! let rgb = lut.apply([0.5, 0.3, 0.2]);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::{Lut1D, Lut3D, LutError, LutResult};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    OneD,
    ThreeD,
}

impl Kind {
    fn keyword(self) -> &'static str {
        match self {
            Kind::OneD => "LUT_1D_SIZE",
            Kind::ThreeD => "LUT_3D_SIZE",
        }
    }
}

/// Header and rows of a `.cube` file, before conversion to a LUT.
struct CubeFile {
    title: Option<String>,
    size: usize,
    domain_min: [f32; 3],
    domain_max: [f32; 3],
    rows: Vec<[f32; 3]>,
}

/// Reads a 1D LUT from a .cube file.
pub fn read_1d<P: AsRef<Path>>(path: P) -> LutResult<Lut1D> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading 1D cube");
    parse_1d(BufReader::new(File::open(path)?))
}

/// Reads a 3D LUT from a .cube file.
pub fn read_3d<P: AsRef<Path>>(path: P) -> LutResult<Lut3D> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading 3D cube");
    parse_3d(BufReader::new(File::open(path)?))
}

/// Parses a 1D LUT. Rows become per-channel tables.
pub fn parse_1d<R: BufRead>(reader: R) -> LutResult<Lut1D> {
    let cube = parse(reader, Kind::OneD)?;

    let mut tables: [Vec<f32>; 3] = Default::default();
    for row in &cube.rows {
        for (table, v) in tables.iter_mut().zip(row) {
            table.push(*v);
        }
    }
    let [r, g, b] = tables;

    debug!(size = cube.size, title = ?cube.title, "parsed 1D cube");
    Lut1D::from_rgb(r, g, b)?.with_domain(cube.domain_min, cube.domain_max)
}

/// Parses a 3D LUT.
pub fn parse_3d<R: BufRead>(reader: R) -> LutResult<Lut3D> {
    let cube = parse(reader, Kind::ThreeD)?;
    let size = cube.size;

    // file: r + size * (g + size * b), memory: b + size * (g + size * r)
    let mut data = vec![0.0f32; cube.rows.len() * 3];
    for (file_idx, row) in cube.rows.iter().enumerate() {
        let r = file_idx % size;
        let g = (file_idx / size) % size;
        let b = file_idx / (size * size);
        let mem = 3 * (b + size * (g + size * r));
        data[mem..mem + 3].copy_from_slice(row);
    }

    debug!(size, title = ?cube.title, "parsed 3D cube");
    Lut3D::new(data, size)?.with_domain(cube.domain_min, cube.domain_max)
}

fn parse<R: BufRead>(reader: R, kind: Kind) -> LutResult<CubeFile> {
    let mut title = None;
    let mut size: Option<usize> = None;
    let mut domain_min = [0.0_f32; 3];
    let mut domain_max = [1.0_f32; 3];
    let mut rows: Vec<[f32; 3]> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(head) = tokens.next() else { continue };

        match head {
            "TITLE" => {
                let rest = line["TITLE".len()..].trim();
                title = Some(rest.trim_matches('"').to_string());
            }
            "LUT_1D_SIZE" | "LUT_3D_SIZE" => {
                if head != kind.keyword() {
                    return Err(LutError::ParseError(format!(
                        "expected {}, found {}",
                        kind.keyword(),
                        head
                    )));
                }
                size = Some(parse_size(tokens.next(), line_no)?);
            }
            "DOMAIN_MIN" => domain_min = parse_triple(tokens, line_no)?,
            "DOMAIN_MAX" => domain_max = parse_triple(tokens, line_no)?,
            "LUT_1D_INPUT_RANGE" | "LUT_3D_INPUT_RANGE" => {
                let lo = parse_value(tokens.next(), line_no)?;
                let hi = parse_value(tokens.next(), line_no)?;
                domain_min = [lo; 3];
                domain_max = [hi; 3];
            }
            _ if head.starts_with(|c: char| c.is_ascii_alphabetic()) => {
                trace!(keyword = head, "skipping unknown cube keyword");
            }
            _ => rows.push(parse_triple(line.split_whitespace(), line_no)?),
        }
    }

    let size = size.ok_or_else(|| LutError::ParseError(format!("missing {}", kind.keyword())))?;
    if size < 2 {
        return Err(LutError::ParseError(format!(
            "{} must be at least 2, got {}",
            kind.keyword(),
            size
        )));
    }
    let expected = match kind {
        Kind::OneD => Some(size),
        Kind::ThreeD => size.checked_pow(3),
    }
    .ok_or_else(|| {
        LutError::ParseError(format!("{} {} is too large", kind.keyword(), size))
    })?;
    if rows.len() != expected {
        return Err(LutError::ParseError(format!(
            "expected {} entries for size {}, found {}",
            expected,
            size,
            rows.len()
        )));
    }

    Ok(CubeFile {
        title,
        size,
        domain_min,
        domain_max,
        rows,
    })
}

fn parse_size(token: Option<&str>, line_no: usize) -> LutResult<usize> {
    token
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| LutError::ParseError(format!("line {}: invalid size", line_no + 1)))
}

fn parse_value(token: Option<&str>, line_no: usize) -> LutResult<f32> {
    let token = token
        .ok_or_else(|| LutError::ParseError(format!("line {}: missing value", line_no + 1)))?;
    token.parse().map_err(|_| {
        LutError::ParseError(format!("line {}: invalid number '{}'", line_no + 1, token))
    })
}

fn parse_triple<'a>(mut tokens: impl Iterator<Item = &'a str>, line_no: usize) -> LutResult<[f32; 3]> {
    let triple = [
        parse_value(tokens.next(), line_no)?,
        parse_value(tokens.next(), line_no)?,
        parse_value(tokens.next(), line_no)?,
    ];
    if tokens.next().is_some() {
        return Err(LutError::ParseError(format!(
            "line {}: expected 3 values",
            line_no + 1
        )));
    }
    Ok(triple)
}

/// Writes a 1D LUT to a .cube file.
pub fn write_1d<P: AsRef<Path>>(path: P, lut: &Lut1D) -> LutResult<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_1d_to(&mut writer, lut)?;
    writer.flush()?;
    Ok(())
}

/// Writes a 1D LUT in .cube form to any writer.
pub fn write_1d_to<W: Write>(writer: &mut W, lut: &Lut1D) -> LutResult<()> {
    writeln!(writer, "# Generated by vfx-lut")?;
    writeln!(writer, "LUT_1D_SIZE {}", lut.size())?;
    write_domain(writer, lut.domain_min(), lut.domain_max())?;

    let (r, g, b) = (lut.channel(0), lut.channel(1), lut.channel(2));
    for i in 0..lut.size() {
        writeln!(writer, "{} {} {}", r[i], g[i], b[i])?;
    }
    Ok(())
}

/// Writes a 3D LUT to a .cube file.
pub fn write_3d<P: AsRef<Path>>(path: P, lut: &Lut3D) -> LutResult<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_3d_to(&mut writer, lut)?;
    writer.flush()?;
    Ok(())
}

/// Writes a 3D LUT in .cube form to any writer, red-fastest.
pub fn write_3d_to<W: Write>(writer: &mut W, lut: &Lut3D) -> LutResult<()> {
    let size = lut.size();
    writeln!(writer, "# Generated by vfx-lut")?;
    writeln!(writer, "LUT_3D_SIZE {}", size)?;
    write_domain(writer, lut.domain_min(), lut.domain_max())?;

    for b in 0..size {
        for g in 0..size {
            for r in 0..size {
                let [x, y, z] = lut.node(r, g, b);
                writeln!(writer, "{} {} {}", x, y, z)?;
            }
        }
    }
    Ok(())
}

fn write_domain<W: Write>(writer: &mut W, min: [f32; 3], max: [f32; 3]) -> LutResult<()> {
    if min != [0.0; 3] || max != [1.0; 3] {
        writeln!(writer, "DOMAIN_MIN {} {} {}", min[0], min[1], min[2])?;
        writeln!(writer, "DOMAIN_MAX {} {} {}", max[0], max[1], max[2])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Interpolation;
    use std::io::Cursor;

    const SWAP_RB: &str = r#"
# red and blue swapped
TITLE "Swap"
LUT_3D_SIZE 2

0.0 0.0 0.0
0.0 0.0 1.0
0.0 1.0 0.0
0.0 1.0 1.0
1.0 0.0 0.0
1.0 0.0 1.0
1.0 1.0 0.0
1.0 1.0 1.0
"#;

    #[test]
    fn parse_3d_reorders_rows() {
        let lut = parse_3d(Cursor::new(SWAP_RB)).unwrap();
        assert_eq!(lut.size(), 2);
        // second file row is input r=1, g=0, b=0
        assert_eq!(lut.node(1, 0, 0), [0.0, 0.0, 1.0]);
        assert_eq!(lut.node(0, 0, 1), [1.0, 0.0, 0.0]);
        assert_eq!(lut.apply([0.25, 0.5, 0.75]), [0.75, 0.5, 0.25]);
    }

    #[test]
    fn parse_1d_channels_and_domain() {
        let text = "LUT_1D_SIZE 3\nDOMAIN_MIN -1 -1 -1\nDOMAIN_MAX 1 1 1\n0 0 1\n0.5 0.25 0.5\n1 1 0\n";
        let lut = parse_1d(Cursor::new(text)).unwrap();
        assert_eq!(lut.size(), 3);
        assert_eq!(lut.channel(1), &[0.0, 0.25, 1.0]);
        assert_eq!(lut.apply_rgb([0.0, 0.0, 0.0]), [0.5, 0.25, 0.5]);
    }

    #[test]
    fn input_range_keyword() {
        let text = "LUT_1D_SIZE 2\nLUT_1D_INPUT_RANGE 0 4\n0 0 0\n1 1 1\n";
        let lut = parse_1d(Cursor::new(text)).unwrap();
        assert_eq!(lut.apply(2.0), 0.5);
    }

    #[test]
    fn wrong_kind_is_error() {
        assert!(parse_1d(Cursor::new(SWAP_RB)).is_err());
        assert!(parse_3d(Cursor::new("LUT_1D_SIZE 2\n0 0 0\n1 1 1\n")).is_err());
    }

    #[test]
    fn entry_count_is_checked() {
        let text = "LUT_3D_SIZE 2\n0 0 0\n1 1 1\n";
        let err = parse_3d(Cursor::new(text)).unwrap_err();
        assert!(err.to_string().contains("expected 8"));
        assert!(parse_3d(Cursor::new("0 0 0\n")).is_err());
    }

    #[test]
    fn size_one_is_rejected() {
        let text = "LUT_3D_SIZE 1\n0 0 0\n";
        assert!(matches!(parse_3d(Cursor::new(text)), Err(LutError::ParseError(_))));
        let text = "LUT_1D_SIZE 0\n";
        assert!(matches!(parse_1d(Cursor::new(text)), Err(LutError::ParseError(_))));
    }

    #[test]
    fn oversized_header_is_error() {
        let text = "LUT_3D_SIZE 3000000\n0 0 0\n";
        let err = parse_3d(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, LutError::ParseError(_)), "{}", err);

        let text = format!("LUT_3D_SIZE {}\n0 0 0\n", usize::MAX);
        assert!(parse_3d(Cursor::new(text)).is_err());
    }

    #[test]
    fn malformed_rows() {
        assert!(parse_1d(Cursor::new("LUT_1D_SIZE 2\n0 0\n1 1 1\n")).is_err());
        assert!(parse_1d(Cursor::new("LUT_1D_SIZE 2\n0 0 0 0\n1 1 1\n")).is_err());
        assert!(parse_1d(Cursor::new("LUT_1D_SIZE 2\n0 x 0\n1 1 1\n")).is_err());
    }

    #[test]
    fn roundtrip_3d() {
        let lut = Lut3D::from_fn(5, |[r, g, b]| [g, b * 0.5, r * r])
            .unwrap()
            .with_domain([-0.5; 3], [1.5; 3])
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grade.cube");
        write_3d(&path, &lut).unwrap();
        let loaded = read_3d(&path).unwrap();

        assert_eq!(loaded, lut);
        assert_eq!(loaded.interpolation(), Interpolation::Linear);
    }

    #[test]
    fn roundtrip_1d() {
        let lut = Lut1D::from_rgb(
            vec![0.0, 0.1, 0.7, 1.0],
            vec![0.0, 0.3, 0.6, 0.9],
            vec![1.0, 0.5, 0.25, 0.125],
        )
        .unwrap();
        let mut bytes = Vec::new();
        write_1d_to(&mut bytes, &lut).unwrap();
        assert_eq!(parse_1d(bytes.as_slice()).unwrap(), lut);
    }
}
