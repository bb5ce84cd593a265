/*!
C++ header emission.

The generated header declares, inside one namespace:
- a `usize` size constant,
- `UCodepoint` lower and upper tables,
- `Utf8Char` lower and upper tables.

Entry `i` of all four tables describes the `i`-th [`CaseMapping`](crate::case_folding::CaseMapping).

## Example
```
use unicode_table_gen::{case_folding::MappingTable, header::HeaderConfig};

let table: MappingTable = "0041; C; 0061; # LATIN CAPITAL LETTER A\n".parse().unwrap();
let header = HeaderConfig::default().render(&table).unwrap();
assert!(header.contains("constexpr usize UnicodeCaseTableSize = 1;"));
assert!(header.contains("\t\t{ { 0x41, 0x00, 0x00, 0x00 }, 1 }, \n"));
```
*/
use std::{
    fmt::{self, Display, Write},
    fs,
    path::Path,
};

use bon::Builder;
use itertools::Itertools;
use log::{info, warn};

use crate::{
    case_folding::MappingTable,
    error::{Error, Result},
    utf8,
};

/// Names and layout of the generated header.
///
/// The defaults produce the header expected by `core/string/StringUtils.inl`.
///
/// ## Example
/// ```
/// use unicode_table_gen::header::HeaderConfig;
///
/// let config = HeaderConfig::builder()
///     .namespace("Text::Case")
///     .codepoints_per_row(16)
///     .build();
/// assert_eq!(config.size_name, "UnicodeCaseTableSize");
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct HeaderConfig {
    #[builder(into, default = String::from("Core::Unicode"))]
    pub namespace: String,
    /// Emitted as `#include "<path>"`, in order.
    #[builder(default = vec!["core/MinInclude.h".to_owned(), "StringUtilTypes.h".to_owned()])]
    pub includes: Vec<String>,
    #[builder(into, default = String::from("UnicodeCaseTableSize"))]
    pub size_name: String,
    #[builder(into, default = String::from("UnicodeCaseLowerTable"))]
    pub lower_name: String,
    #[builder(into, default = String::from("UnicodeCaseUpperTable"))]
    pub upper_name: String,
    #[builder(into, default = String::from("Utf8CaseLowerTable"))]
    pub utf8_lower_name: String,
    #[builder(into, default = String::from("Utf8CaseUpperTable"))]
    pub utf8_upper_name: String,
    /// Only affects readability.
    #[builder(default = 8)]
    pub codepoints_per_row: usize,
    #[builder(default = 4)]
    pub utf8_per_row: usize,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// `0x00041` style, zero-padded to 5 hex digits.
struct Codepoint(u32);

impl Display for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:05X}", self.0)
    }
}

impl HeaderConfig {
    fn validate(&self) -> Result<()> {
        if self.codepoints_per_row == 0 || self.utf8_per_row == 0 {
            return Err(Error::Config("row width must be at least 1"));
        }
        if self.namespace.is_empty() {
            return Err(Error::Config("namespace must not be empty"));
        }
        Ok(())
    }

    /// Renders the whole header into memory.
    pub fn render(&self, table: &MappingTable) -> Result<String> {
        self.validate()?;
        check_round_trip(table)?;
        if table.is_empty() {
            warn!("no case mappings, the generated arrays will be empty");
        }

        let mut out = String::new();
        self.write_header(&mut out, table)
            .expect("writing to a String cannot fail");
        Ok(out)
    }

    /// Renders the header and writes it to `path`, replacing any existing file.
    ///
    /// Nothing is written if rendering fails.
    pub fn write(&self, table: &MappingTable, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let header = self.render(table)?;
        fs::write(path, header)?;
        info!("wrote {} case table entries to {}", table.len(), path.display());
        Ok(())
    }

    fn write_header(&self, out: &mut String, table: &MappingTable) -> fmt::Result {
        writeln!(out, "#pragma once")?;
        if let Some(version) = table.version() {
            writeln!(out, "// Generated from {version}")?;
        }
        for include in &self.includes {
            writeln!(out, "#include \"{include}\"")?;
        }
        writeln!(out)?;
        writeln!(out, "namespace {}", self.namespace)?;
        writeln!(out, "{{")?;
        writeln!(out, "\tconstexpr usize {} = {};", self.size_name, table.len())?;

        self.write_array(
            out,
            "UCodepoint",
            &self.lower_name,
            table.lowers().map(Codepoint),
            self.codepoints_per_row,
        )?;
        writeln!(out)?;
        self.write_array(
            out,
            "UCodepoint",
            &self.upper_name,
            table.uppers().map(Codepoint),
            self.codepoints_per_row,
        )?;
        writeln!(out)?;
        self.write_array(
            out,
            "Utf8Char",
            &self.utf8_lower_name,
            table.lowers().map(utf8::encode),
            self.utf8_per_row,
        )?;
        writeln!(out)?;
        self.write_array(
            out,
            "Utf8Char",
            &self.utf8_upper_name,
            table.uppers().map(utf8::encode),
            self.utf8_per_row,
        )?;

        writeln!(out, "}}")
    }

    fn write_array<T: Display>(
        &self,
        out: &mut String,
        ty: &str,
        name: &str,
        values: impl Iterator<Item = T>,
        per_row: usize,
    ) -> fmt::Result {
        writeln!(out, "\tconstexpr {ty} {name}[{}] =", self.size_name)?;
        writeln!(out, "\t{{")?;
        for row in &values.chunks(per_row) {
            out.push_str("\t\t");
            for value in row {
                write!(out, "{value}, ")?;
            }
            out.push('\n');
        }
        writeln!(out, "\t}};")
    }
}

/// Every UTF-8 record must decode back to the codepoint at the same index.
fn check_round_trip(table: &MappingTable) -> Result<()> {
    match table.iter().position(|m| {
        utf8::decode(&utf8::encode(m.lower)) != m.lower
            || utf8::decode(&utf8::encode(m.upper)) != m.upper
    }) {
        Some(index) => Err(Error::Inconsistent { index }),
        None => Ok(()),
    }
}
