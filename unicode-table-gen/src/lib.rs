//! Unicode case table generator.
/*!
Turns the simple case foldings of Unicode's `CaseFolding.txt` into a C++ header
with four parallel `constexpr` arrays:

| Array | Element |
| --- | --- |
| `UnicodeCaseLowerTable` | lowercase `UCodepoint` |
| `UnicodeCaseUpperTable` | uppercase `UCodepoint` |
| `Utf8CaseLowerTable` | lowercase `Utf8Char` (UTF-8 bytes and length) |
| `Utf8CaseUpperTable` | uppercase `Utf8Char` |

Only `C` and `S` records are used, see [`case_folding`].

## Example
```no_run
unicode_table_gen::generate("data/CaseFolding.txt", "src/core/string/UnicodeTables.h").unwrap();
```

## Crate features
*/
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(feature = "doc", doc = document_features::document_features!())]
use std::path::Path;

pub mod case_folding;
pub mod error;
pub mod header;
pub mod logger;
pub mod utf8;

pub use error::{Error, Result};

use crate::{case_folding::MappingTable, header::HeaderConfig};

/// Parses `input` and writes the header with the default [`HeaderConfig`] to `output`.
pub fn generate(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<MappingTable> {
    let table = MappingTable::from_path(input)?;
    HeaderConfig::default().write(&table, output)?;
    Ok(table)
}
