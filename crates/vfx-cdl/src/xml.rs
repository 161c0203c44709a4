//! ASC CDL XML files: `.cc` (one ColorCorrection) and `.ccc`
//! (ColorCorrectionCollection).
//!
//! Both are read with one streaming pass that collects every
//! `ColorCorrection` element in the document, so a `.cc` reader also
//! accepts a `.ccc` and returns its first entry.
//!
//! # Example
//!
//! ```rust
//! use vfx_cdl::xml::parse_cc;
//!
//! let xml = r#"<ColorCorrection id="shot_010">
//!   <SOPNode>
//!     <Slope>1.1 1.0 0.9</Slope>
//!     <Offset>0.02 0.0 -0.02</Offset>
//!     <Power>1.0 1.0 1.0</Power>
//!   </SOPNode>
//!   <SatNode><Saturation>1.1</Saturation></SatNode>
//! </ColorCorrection>"#;
//!
//! let cc = parse_cc(xml.as_bytes()).unwrap();
//! assert_eq!(cc.id.as_deref(), Some("shot_010"));
//! assert_eq!(cc.params.slope, [1.1, 1.0, 0.9]);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::{CdlError, CdlParams, CdlResult};

/// One ASC ColorCorrection: CDL values plus identification.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorCorrection {
    /// `id` attribute.
    pub id: Option<String>,
    /// `Description` children of the ColorCorrection element.
    pub descriptions: Vec<String>,
    /// Slope/offset/power/saturation.
    pub params: CdlParams,
}

impl ColorCorrection {
    /// Wraps parameters with an id.
    pub fn new(id: impl Into<String>, params: CdlParams) -> Self {
        Self {
            id: Some(id.into()),
            descriptions: Vec::new(),
            params,
        }
    }
}

/// A `.ccc` document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorCorrectionCollection {
    /// Descriptions attached to the collection itself.
    pub descriptions: Vec<String>,
    /// Corrections in document order.
    pub corrections: Vec<ColorCorrection>,
}

impl ColorCorrectionCollection {
    /// Finds a correction by id.
    pub fn find(&self, id: &str) -> Option<&ColorCorrection> {
        self.corrections.iter().find(|cc| cc.id.as_deref() == Some(id))
    }

    /// First correction, if any.
    pub fn first(&self) -> Option<&ColorCorrection> {
        self.corrections.first()
    }

    /// Number of corrections.
    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    /// True when the collection holds no corrections.
    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }
}

// ============================================================================
// Reading
// ============================================================================

/// Reads a `.cc` file.
pub fn read_cc<P: AsRef<Path>>(path: P) -> CdlResult<ColorCorrection> {
    let file = File::open(path.as_ref())?;
    parse_cc(BufReader::new(file))
}

/// Parses a single ColorCorrection. Fails if the document has none.
pub fn parse_cc<R: BufRead>(reader: R) -> CdlResult<ColorCorrection> {
    parse_collection(reader)?
        .corrections
        .into_iter()
        .next()
        .ok_or_else(|| CdlError::ParseError("no ColorCorrection element found".into()))
}

/// Reads a `.ccc` file.
pub fn read_ccc<P: AsRef<Path>>(path: P) -> CdlResult<ColorCorrectionCollection> {
    let file = File::open(path.as_ref())?;
    parse_ccc(BufReader::new(file))
}

/// Parses a ColorCorrectionCollection. Fails if the document has no
/// ColorCorrection elements.
pub fn parse_ccc<R: BufRead>(reader: R) -> CdlResult<ColorCorrectionCollection> {
    let collection = parse_collection(reader)?;
    if collection.is_empty() {
        return Err(CdlError::ParseError("no ColorCorrection element found".into()));
    }
    Ok(collection)
}

fn parse_collection<R: BufRead>(reader: R) -> CdlResult<ColorCorrectionCollection> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut text = String::new();
    let mut path: Vec<String> = Vec::new();
    let mut current: Option<ColorCorrection> = None;
    let mut out = ColorCorrectionCollection::default();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = local_name(&e);
                if name == "ColorCorrection" {
                    current = Some(ColorCorrection {
                        id: attr(&e, b"id"),
                        ..Default::default()
                    });
                }
                path.push(name);
                text.clear();
            }
            Ok(Event::Empty(e)) => {
                // <ColorCorrection id="x"/> is a valid identity correction
                if local_name(&e) == "ColorCorrection" {
                    out.corrections.push(ColorCorrection {
                        id: attr(&e, b"id"),
                        ..Default::default()
                    });
                }
            }
            Ok(Event::Text(e)) => {
                text.push_str(&e.decode().unwrap_or_default());
            }
            Ok(Event::End(_)) => {
                let name = path.pop().unwrap_or_default();
                let parent = path.last().map(String::as_str);

                if let Some(cc) = current.as_mut() {
                    match name.as_str() {
                        "Slope" => cc.params.slope = parse_triple(&text, "Slope")?,
                        "Offset" => cc.params.offset = parse_triple(&text, "Offset")?,
                        "Power" => cc.params.power = parse_triple(&text, "Power")?,
                        "Saturation" => cc.params.saturation = parse_scalar(&text, "Saturation")?,
                        "Description" if parent == Some("ColorCorrection") => {
                            cc.descriptions.push(text.trim().to_string());
                        }
                        _ => {}
                    }
                }

                match name.as_str() {
                    "ColorCorrection" => {
                        if let Some(cc) = current.take() {
                            out.corrections.push(cc);
                        }
                    }
                    "Description" if parent == Some("ColorCorrectionCollection") => {
                        out.descriptions.push(text.trim().to_string());
                    }
                    _ => {}
                }
                text.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(CdlError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    debug!(corrections = out.corrections.len(), "parsed CDL XML");
    Ok(out)
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
        .filter(|s| !s.is_empty())
}

fn parse_scalar(s: &str, what: &str) -> CdlResult<f32> {
    s.trim()
        .parse()
        .map_err(|e| CdlError::ParseError(format!("invalid {}: '{}' ({})", what, s.trim(), e)))
}

fn parse_triple(s: &str, what: &str) -> CdlResult<[f32; 3]> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(CdlError::ParseError(format!(
            "{} expects 3 values, got {}",
            what,
            parts.len()
        )));
    }
    Ok([
        parse_scalar(parts[0], what)?,
        parse_scalar(parts[1], what)?,
        parse_scalar(parts[2], what)?,
    ])
}

// ============================================================================
// Writing
// ============================================================================

/// Writes a `.cc` file.
pub fn write_cc<P: AsRef<Path>>(path: P, cc: &ColorCorrection) -> CdlResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_cc_to(&mut writer, cc)?;
    writer.flush()?;
    Ok(())
}

/// Writes a single ColorCorrection document.
pub fn write_cc_to<W: Write>(writer: &mut W, cc: &ColorCorrection) -> CdlResult<()> {
    writeln!(writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    write_correction(writer, cc, "")
}

/// Writes a `.ccc` file.
pub fn write_ccc<P: AsRef<Path>>(path: P, collection: &ColorCorrectionCollection) -> CdlResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_ccc_to(&mut writer, collection)?;
    writer.flush()?;
    Ok(())
}

/// Writes a ColorCorrectionCollection document.
pub fn write_ccc_to<W: Write>(
    writer: &mut W,
    collection: &ColorCorrectionCollection,
) -> CdlResult<()> {
    writeln!(writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(
        writer,
        "<ColorCorrectionCollection xmlns=\"urn:ASC:CDL:v1.01\">"
    )?;
    for desc in &collection.descriptions {
        writeln!(writer, "  <Description>{}</Description>", escape(desc))?;
    }
    for cc in &collection.corrections {
        write_correction(writer, cc, "  ")?;
    }
    writeln!(writer, "</ColorCorrectionCollection>")?;
    Ok(())
}

fn write_correction<W: Write>(writer: &mut W, cc: &ColorCorrection, indent: &str) -> CdlResult<()> {
    let p = &cc.params;
    match &cc.id {
        Some(id) => writeln!(writer, "{indent}<ColorCorrection id=\"{}\">", escape(id))?,
        None => writeln!(writer, "{indent}<ColorCorrection>")?,
    }
    for desc in &cc.descriptions {
        writeln!(writer, "{indent}  <Description>{}</Description>", escape(desc))?;
    }
    writeln!(writer, "{indent}  <SOPNode>")?;
    writeln!(writer, "{indent}    <Slope>{} {} {}</Slope>", p.slope[0], p.slope[1], p.slope[2])?;
    writeln!(writer, "{indent}    <Offset>{} {} {}</Offset>", p.offset[0], p.offset[1], p.offset[2])?;
    writeln!(writer, "{indent}    <Power>{} {} {}</Power>", p.power[0], p.power[1], p.power[2])?;
    writeln!(writer, "{indent}  </SOPNode>")?;
    writeln!(writer, "{indent}  <SatNode>")?;
    writeln!(writer, "{indent}    <Saturation>{}</Saturation>", p.saturation)?;
    writeln!(writer, "{indent}  </SatNode>")?;
    writeln!(writer, "{indent}</ColorCorrection>")?;
    Ok(())
}

fn escape(s: &str) -> std::borrow::Cow<'_, str> {
    quick_xml::escape::escape(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CCC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ColorCorrectionCollection xmlns="urn:ASC:CDL:v1.01">
  <Description>reel 1</Description>
  <ColorCorrection id="a">
    <Description>warm</Description>
    <SOPNode>
      <Description>sop</Description>
      <Slope>1.1 1.0 0.9</Slope>
      <Offset>0.02 0 -0.02</Offset>
      <Power>1 1 1</Power>
    </SOPNode>
    <SatNode>
      <Saturation>1.1</Saturation>
    </SatNode>
  </ColorCorrection>
  <ColorCorrection id="b">
    <SOPNode>
      <Offset>-0.1 -0.1 -0.1</Offset>
      <Power>1.2 1.2 1.2</Power>
    </SOPNode>
  </ColorCorrection>
</ColorCorrectionCollection>"#;

    #[test]
    fn parse_collection_entries() {
        let ccc = parse_ccc(CCC.as_bytes()).unwrap();
        assert_eq!(ccc.len(), 2);
        assert_eq!(ccc.descriptions, vec!["reel 1".to_string()]);

        let a = ccc.find("a").unwrap();
        assert_eq!(a.descriptions, vec!["warm".to_string()]);
        assert_eq!(a.params.slope, [1.1, 1.0, 0.9]);
        assert_eq!(a.params.offset, [0.02, 0.0, -0.02]);
        assert_eq!(a.params.saturation, 1.1);

        // Missing nodes keep identity defaults.
        let b = ccc.find("b").unwrap();
        assert_eq!(b.params.slope, [1.0; 3]);
        assert_eq!(b.params.power, [1.2; 3]);
        assert_eq!(b.params.saturation, 1.0);
    }

    #[test]
    fn cc_reader_takes_first() {
        let cc = parse_cc(CCC.as_bytes()).unwrap();
        assert_eq!(cc.id.as_deref(), Some("a"));
    }

    #[test]
    fn empty_document_is_error() {
        assert!(parse_cc("<Nothing/>".as_bytes()).is_err());
        assert!(parse_ccc("<ColorCorrectionCollection/>".as_bytes()).is_err());
    }

    #[test]
    fn bad_triple_is_error() {
        let xml = "<ColorCorrection><SOPNode><Slope>1 2</Slope></SOPNode></ColorCorrection>";
        let err = parse_cc(xml.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Slope"));

        let xml = "<ColorCorrection><SatNode><Saturation>abc</Saturation></SatNode></ColorCorrection>";
        assert!(matches!(parse_cc(xml.as_bytes()), Err(CdlError::ParseError(_))));
    }

    #[test]
    fn write_then_read_collection() {
        let collection = ColorCorrectionCollection {
            descriptions: vec!["reel 2 looks".into()],
            corrections: vec![
                ColorCorrection::new(
                    "warm",
                    CdlParams::new().with_slope([1.1, 1.0, 0.9]).with_saturation(1.1),
                ),
                ColorCorrection::new("contrast", CdlParams::new().with_power([1.2; 3])),
            ],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.ccc");
        write_ccc(&path, &collection).unwrap();

        let back = read_ccc(&path).unwrap();
        assert_eq!(back, collection);
    }

    #[test]
    fn write_then_read_single() {
        let cc = ColorCorrection::new("shot", CdlParams::new().with_offset([-0.1; 3]));
        let mut bytes = Vec::new();
        write_cc_to(&mut bytes, &cc).unwrap();
        assert_eq!(parse_cc(bytes.as_slice()).unwrap(), cc);
    }
}
