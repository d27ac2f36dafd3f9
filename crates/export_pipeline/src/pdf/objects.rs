//! PDF object model
//!
//! The handful of object types an image-only document needs, plus a
//! serializer writing them in PDF syntax.

use std::collections::BTreeMap;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(PdfString),
    Name(String),
    Array(Vec<PdfObject>),
    Dictionary(PdfDictionary),
    /// Indirect reference to object `n 0 R`
    Reference(u32),
}

impl PdfObject {
    pub fn name(name: impl Into<String>) -> Self {
        PdfObject::Name(name.into())
    }

    pub fn text(text: &str) -> Self {
        PdfObject::String(PdfString::from_text(text))
    }

    pub fn real_array(values: &[f64]) -> Self {
        PdfObject::Array(values.iter().map(|v| PdfObject::Real(*v)).collect())
    }
}

impl From<PdfDictionary> for PdfObject {
    fn from(dict: PdfDictionary) -> Self {
        PdfObject::Dictionary(dict)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PdfString {
    Literal(Vec<u8>),
    Hex(Vec<u8>),
}

impl PdfString {
    /// Encode document text.
    ///
    /// ASCII stays a literal string; anything else becomes UTF-16BE with a
    /// byte-order mark so viewers show names like "Zoë" correctly.
    pub fn from_text(text: &str) -> Self {
        if text.is_ascii() {
            return PdfString::Literal(text.as_bytes().to_vec());
        }
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        PdfString::Hex(bytes)
    }
}

/// Dictionary with deterministic (sorted) key order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfDictionary {
    entries: BTreeMap<String, PdfObject>,
}

impl PdfDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_type(type_name: &str) -> Self {
        let mut dict = Self::new();
        dict.insert("Type", PdfObject::name(type_name));
        dict
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PdfObject>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<PdfObject>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PdfObject)> {
        self.entries.iter()
    }
}

/// Stream object: dictionary plus payload
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStream {
    pub dict: PdfDictionary,
    pub data: Vec<u8>,
    /// Set once `data` carries a filter; the writer will not compress again
    pub filtered: bool,
}

impl PdfStream {
    pub fn new(dict: PdfDictionary, data: Vec<u8>) -> Self {
        Self {
            dict,
            data,
            filtered: false,
        }
    }
}

/// Writes objects in PDF syntax
pub struct PdfSerializer<W: Write> {
    out: W,
}

impl<W: Write> PdfSerializer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn write_object(&mut self, object: &PdfObject) -> io::Result<()> {
        match object {
            PdfObject::Null => self.out.write_all(b"null"),
            PdfObject::Boolean(b) => write!(self.out, "{}", b),
            PdfObject::Integer(n) => write!(self.out, "{}", n),
            PdfObject::Real(n) => self.out.write_all(format_real(*n).as_bytes()),
            PdfObject::String(s) => self.write_string(s),
            PdfObject::Name(name) => self.write_name(name),
            PdfObject::Array(items) => {
                self.out.write_all(b"[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.write_all(b" ")?;
                    }
                    self.write_object(item)?;
                }
                self.out.write_all(b"]")
            }
            PdfObject::Dictionary(dict) => self.write_dictionary(dict),
            PdfObject::Reference(num) => write!(self.out, "{} 0 R", num),
        }
    }

    pub fn write_dictionary(&mut self, dict: &PdfDictionary) -> io::Result<()> {
        self.out.write_all(b"<<")?;
        for (key, value) in dict.iter() {
            self.out.write_all(b" ")?;
            self.write_name(key)?;
            self.out.write_all(b" ")?;
            self.write_object(value)?;
        }
        self.out.write_all(b" >>")
    }

    pub fn write_stream(&mut self, stream: &PdfStream) -> io::Result<()> {
        self.write_dictionary(&stream.dict)?;
        self.out.write_all(b"\nstream\n")?;
        self.out.write_all(&stream.data)?;
        self.out.write_all(b"\nendstream")
    }

    fn write_string(&mut self, s: &PdfString) -> io::Result<()> {
        match s {
            PdfString::Literal(bytes) => {
                self.out.write_all(b"(")?;
                for &byte in bytes {
                    match byte {
                        b'(' | b')' | b'\\' => self.out.write_all(&[b'\\', byte])?,
                        b'\n' => self.out.write_all(b"\\n")?,
                        b'\r' => self.out.write_all(b"\\r")?,
                        b'\t' => self.out.write_all(b"\\t")?,
                        0x20..=0x7E => self.out.write_all(&[byte])?,
                        _ => write!(self.out, "\\{:03o}", byte)?,
                    }
                }
                self.out.write_all(b")")
            }
            PdfString::Hex(bytes) => {
                self.out.write_all(b"<")?;
                for byte in bytes {
                    write!(self.out, "{:02X}", byte)?;
                }
                self.out.write_all(b">")
            }
        }
    }

    fn write_name(&mut self, name: &str) -> io::Result<()> {
        self.out.write_all(b"/")?;
        for byte in name.bytes() {
            let delimiter = matches!(
                byte,
                b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
            );
            if (0x21..=0x7E).contains(&byte) && !delimiter {
                self.out.write_all(&[byte])?;
            } else {
                write!(self.out, "#{:02X}", byte)?;
            }
        }
        Ok(())
    }
}

/// Shortest decimal form with at most four fractional digits
pub fn format_real(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format!("{}", n as i64);
    }
    let s = format!("{:.4}", n);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
