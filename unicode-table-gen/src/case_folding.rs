/*!
Parsing of the Unicode [`CaseFolding.txt`](https://www.unicode.org/Public/16.0.0/ucd/CaseFolding.txt)
data file.

Each record has the form:
```text
<code>; <status>; <mapping>; # <name>
```
Only the simple mappings are kept, i.e. status `C` (common) and `S` (simple).
`F` (full) mappings may expand to several codepoints and `T` (Turkic) mappings
are locale specific, both are skipped.

The code field is taken as the uppercase side and the mapping field as the
lowercase side of a [`CaseMapping`]. File order is preserved, the generated
tables are indexed positionally.

Records are split on `;` and each field is validated, so spacing is not
significant. A status other than `C`, `S`, `F` or `T` is rejected with
[`ParseErrorKind::UnknownStatus`] rather than kept as a simple mapping.
*/
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    slice,
    str::FromStr,
};

use log::{debug, info, trace};

use crate::error::{Error, ParseErrorKind, Result};

/// Largest Unicode scalar value.
const MAX_CODEPOINT: u32 = 0x10FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseMapping {
    pub lower: u32,
    pub upper: u32,
}

impl CaseMapping {
    pub const fn new(lower: u32, upper: u32) -> Self {
        Self { lower, upper }
    }
}

impl From<(u32, u32)> for CaseMapping {
    fn from((lower, upper): (u32, u32)) -> Self {
        Self::new(lower, upper)
    }
}

/// Case folding status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// `C`: common to simple and full folding.
    Common,
    /// `S`: simple folding, used when the full folding differs.
    Simple,
    /// `F`: full folding, may map to several codepoints.
    Full,
    /// `T`: Turkic-only mapping for dotted/dotless I.
    Turkic,
}

impl Status {
    /// Whether records with this status map exactly one codepoint to one codepoint.
    pub fn is_simple(self) -> bool {
        matches!(self, Status::Common | Status::Simple)
    }
}

impl TryFrom<&str> for Status {
    type Error = ParseErrorKind;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(match value {
            "C" => Status::Common,
            "S" => Status::Simple,
            "F" => Status::Full,
            "T" => Status::Turkic,
            _ => return Err(ParseErrorKind::UnknownStatus(value.to_owned())),
        })
    }
}

/// The simple case mappings of a data file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    mappings: Vec<CaseMapping>,
    /// e.g. `CaseFolding-16.0.0.txt`
    version: Option<String>,
}

impl MappingTable {
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<CaseMapping> {
        self.mappings.get(i).copied()
    }

    pub fn iter(&self) -> slice::Iter<'_, CaseMapping> {
        self.mappings.iter()
    }

    pub fn as_slice(&self) -> &[CaseMapping] {
        &self.mappings
    }

    pub fn lowers(&self) -> impl ExactSizeIterator<Item = u32> + '_ {
        self.mappings.iter().map(|m| m.lower)
    }

    pub fn uppers(&self) -> impl ExactSizeIterator<Item = u32> + '_ {
        self.mappings.iter().map(|m| m.upper)
    }

    /// The file name banner from the first line of the data file, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Reads and parses a `CaseFolding.txt` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::from_reader(BufReader::new(file))?;
        info!(
            "parsed {} simple case mappings from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parses `CaseFolding.txt` records line by line. Stops at the first malformed record.
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut table = Self::default();
        for (i, line) in reader.lines().enumerate() {
            table.push_line(i + 1, &line?)?;
        }
        Ok(table)
    }

    fn push_line(&mut self, line_number: usize, line: &str) -> Result<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        if let Some(comment) = trimmed.strip_prefix('#') {
            if self.version.is_none() {
                self.version = parse_banner(comment).map(str::to_owned);
            }
            return Ok(());
        }

        match parse_record(trimmed).map_err(|kind| Error::parse(line_number, kind))? {
            Some(mapping) => {
                trace!(
                    "line {line_number}: U+{:04X} -> U+{:04X}",
                    mapping.upper,
                    mapping.lower
                );
                self.mappings.push(mapping);
            }
            None => debug!("line {line_number}: skipped {trimmed:?}"),
        }
        Ok(())
    }
}

impl FromStr for MappingTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}

impl FromIterator<CaseMapping> for MappingTable {
    fn from_iter<T: IntoIterator<Item = CaseMapping>>(iter: T) -> Self {
        Self {
            mappings: iter.into_iter().collect(),
            version: None,
        }
    }
}

impl<'a> IntoIterator for &'a MappingTable {
    type Item = &'a CaseMapping;
    type IntoIter = slice::Iter<'a, CaseMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `# CaseFolding-16.0.0.txt` -> `CaseFolding-16.0.0.txt`
fn parse_banner(comment: &str) -> Option<&str> {
    let comment = comment.trim();
    (comment.starts_with("CaseFolding") && comment.ends_with(".txt")).then_some(comment)
}

/// Returns `None` for records that are not simple mappings.
fn parse_record(line: &str) -> Result<Option<CaseMapping>, ParseErrorKind> {
    let record = line.split_once('#').map_or(line, |(record, _name)| record);

    let mut fields = record.split(';').map(str::trim);
    let code = fields.next().ok_or(ParseErrorKind::MissingField)?;
    let status = fields.next().ok_or(ParseErrorKind::MissingField)?;
    let mapping = fields.next().ok_or(ParseErrorKind::MissingField)?;
    // The mapping field is `;`-terminated too
    fields.next().ok_or(ParseErrorKind::MissingField)?;

    if !Status::try_from(status)?.is_simple() {
        return Ok(None);
    }

    let upper = parse_codepoint(code)?;
    let lower = parse_codepoint(mapping)?;
    Ok(Some(CaseMapping { lower, upper }))
}

fn parse_codepoint(field: &str) -> Result<u32, ParseErrorKind> {
    let invalid = || ParseErrorKind::InvalidCodepoint(field.to_owned());
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    match u32::from_str_radix(field, 16) {
        Ok(cp) if cp <= MAX_CODEPOINT => Ok(cp),
        _ => Err(invalid()),
    }
}
