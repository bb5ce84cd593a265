use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use unicode_table_gen::{
    case_folding::{CaseMapping, MappingTable},
    generate,
    header::HeaderConfig,
    utf8::{self, Utf8Char},
    Error,
};

/// An excerpt of CaseFolding-16.0.0.txt covering every status and UTF-8 length.
const CASE_FOLDING: &str = "\
# CaseFolding-16.0.0.txt
# Date: 2024-04-30, 21:48:09 GMT
# © 2024 Unicode®, Inc.
#
# Format: <code>; <status>; <mapping>; # <name>

# The status field is:
# C: common case folding, common mappings shared by both simple and full mappings.
# F: full case folding, mappings that cause strings to grow in length.
# S: simple case folding, mappings to single characters where different from F.
# T: special case for uppercase I and dotted uppercase I

0041; C; 0061; # LATIN CAPITAL LETTER A
0042; C; 0062; # LATIN CAPITAL LETTER B
0049; C; 0069; # LATIN CAPITAL LETTER I
0049; T; 0131; # LATIN CAPITAL LETTER I
00B5; C; 03BC; # MICRO SIGN
00C0; C; 00E0; # LATIN CAPITAL LETTER A WITH GRAVE
00DF; F; 0073 0073; # LATIN SMALL LETTER SHARP S
0130; F; 0069 0307; # LATIN CAPITAL LETTER I WITH DOT ABOVE
0130; T; 0069; # LATIN CAPITAL LETTER I WITH DOT ABOVE
0391; C; 03B1; # GREEK CAPITAL LETTER ALPHA
03A3; C; 03C3; # GREEK CAPITAL LETTER SIGMA
0410; C; 0430; # CYRILLIC CAPITAL LETTER A
1E9E; F; 0073 0073; # LATIN CAPITAL LETTER SHARP S
1E9E; S; 00DF; # LATIN CAPITAL LETTER SHARP S
1FBC; F; 03B1 03B9; # GREEK CAPITAL LETTER ALPHA WITH PROSGEGRAMMENI
1FBC; S; 1FB3; # GREEK CAPITAL LETTER ALPHA WITH PROSGEGRAMMENI
2C2F; C; 2C5F; # GLAGOLITIC CAPITAL LETTER CAUDATE CHRIVI
FF21; C; FF41; # FULLWIDTH LATIN CAPITAL LETTER A
10400; C; 10428; # DESERET CAPITAL LETTER LONG I
1E921; C; 1E943; # ADLAM CAPITAL LETTER SHA
#
# EOF
";

const EXPECTED: [(u32, u32); 14] = [
    (0x61, 0x41),
    (0x62, 0x42),
    (0x69, 0x49),
    (0x3BC, 0xB5),
    (0xE0, 0xC0),
    (0x3B1, 0x391),
    (0x3C3, 0x3A3),
    (0x430, 0x410),
    (0xDF, 0x1E9E),
    (0x1FB3, 0x1FBC),
    (0x2C5F, 0x2C2F),
    (0xFF41, 0xFF21),
    (0x10428, 0x10400),
    (0x1E943, 0x1E921),
];

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(env!("CARGO_PKG_NAME"))
        .join(format!("{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Array name -> its values, split on `, ` and stripped of row layout.
fn array_values(header: &str, name: &str) -> Vec<String> {
    let body = header
        .split(&format!(" {name}["))
        .nth(1)
        .unwrap()
        .split("\t{\n")
        .nth(1)
        .unwrap()
        .split("\t};")
        .next()
        .unwrap();
    body.lines()
        .flat_map(|row| row.trim().split_terminator(", ").collect::<Vec<_>>())
        .map(|v| v.trim_end_matches(',').to_owned())
        .filter(|v| !v.is_empty())
        .collect()
}

/// `{ { 0xC2, 0x80, 0x00, 0x00 }, 2 }`, split on `, ` above, is rejoined here.
fn utf8_values(header: &str, name: &str) -> Vec<Utf8Char> {
    let values = array_values(header, name);
    values
        .chunks(5)
        .map(|v| {
            let byte = |s: &str| {
                let s = s.trim_matches(|c| c == '{' || c == '}' || c == ' ');
                u8::from_str_radix(s.trim_start_matches("0x"), 16).unwrap()
            };
            Utf8Char {
                data: [byte(&v[0]), byte(&v[1]), byte(&v[2]), byte(&v[3])],
                size: v[4].trim_end_matches(" }").parse().unwrap(),
            }
        })
        .collect()
}

fn codepoint_values(header: &str, name: &str) -> Vec<u32> {
    array_values(header, name)
        .iter()
        .map(|v| u32::from_str_radix(v.trim_start_matches("0x"), 16).unwrap())
        .collect()
}

#[test]
fn parse_excerpt() {
    let table: MappingTable = CASE_FOLDING.parse().unwrap();
    let expected: Vec<CaseMapping> = EXPECTED.iter().copied().map(Into::into).collect();
    assert_eq!(table.as_slice(), expected);
    assert_eq!(table.version(), Some("CaseFolding-16.0.0.txt"));
}

#[test]
fn tables_are_parallel() {
    let table: MappingTable = CASE_FOLDING.parse().unwrap();
    let header = HeaderConfig::default().render(&table).unwrap();

    assert!(header.contains(&format!(
        "constexpr usize UnicodeCaseTableSize = {};",
        table.len()
    )));

    let lower = codepoint_values(&header, "UnicodeCaseLowerTable");
    let upper = codepoint_values(&header, "UnicodeCaseUpperTable");
    let utf8_lower = utf8_values(&header, "Utf8CaseLowerTable");
    let utf8_upper = utf8_values(&header, "Utf8CaseUpperTable");

    for len in [lower.len(), upper.len(), utf8_lower.len(), utf8_upper.len()] {
        assert_eq!(len, table.len());
    }
    for (i, mapping) in table.iter().enumerate() {
        assert_eq!(lower[i], mapping.lower);
        assert_eq!(upper[i], mapping.upper);
        assert_eq!(utf8::decode(&utf8_lower[i]), lower[i]);
        assert_eq!(utf8::decode(&utf8_upper[i]), upper[i]);
    }

    // Every length class is present
    let sizes: Vec<u32> = utf8_upper.iter().map(|c| c.size).collect();
    for size in 1..=4 {
        assert!(sizes.contains(&size), "{size}");
    }
}

#[test]
fn three_line_scenario() {
    let table: MappingTable = "\
0041; C; 0061; # LATIN CAPITAL LETTER A
0049; F; 0069 0307; # LATIN CAPITAL LETTER I
0053; S; 0073; # LATIN CAPITAL LETTER S
"
    .parse()
    .unwrap();
    assert_eq!(
        table.iter().map(|m| (m.lower, m.upper)).collect::<Vec<_>>(),
        [(0x61, 0x41), (0x73, 0x53)]
    );

    let header = HeaderConfig::default().render(&table).unwrap();
    assert!(header.contains("constexpr usize UnicodeCaseTableSize = 2;"));
    assert_eq!(
        array_values(&header, "UnicodeCaseLowerTable"),
        ["0x00061", "0x00073"]
    );
    assert_eq!(
        array_values(&header, "UnicodeCaseUpperTable"),
        ["0x00041", "0x00053"]
    );
    for (name, table) in [
        ("Utf8CaseLowerTable", [0x61, 0x73]),
        ("Utf8CaseUpperTable", [0x41, 0x53]),
    ] {
        let values = utf8_values(&header, name);
        assert_eq!(values.len(), 2);
        for (c, cp) in values.iter().zip(table) {
            assert_eq!(c.size, 1);
            assert_eq!(c.data, [cp as u8, 0, 0, 0]);
        }
    }
}

#[test]
fn upper_differs_from_lower() {
    let table: MappingTable = "0041; C; 0061; # LATIN CAPITAL LETTER A\n".parse().unwrap();
    let header = HeaderConfig::default().render(&table).unwrap();
    let lower = codepoint_values(&header, "UnicodeCaseLowerTable");
    let upper = codepoint_values(&header, "UnicodeCaseUpperTable");
    assert_eq!(lower, [0x61]);
    assert_eq!(upper, [0x41]);
    assert_ne!(lower, upper);
    assert_ne!(
        utf8_values(&header, "Utf8CaseLowerTable"),
        utf8_values(&header, "Utf8CaseUpperTable")
    );
}

#[test]
fn generate_file() {
    let dir = scratch_dir("generate_file");
    let input = dir.join("CaseFolding.txt");
    let output = dir.join("UnicodeTables.h");
    fs::write(&input, CASE_FOLDING).unwrap();
    fs::write(&output, "stale").unwrap();

    let table = generate(&input, &output).unwrap();
    let header = fs::read_to_string(&output).unwrap();
    assert_eq!(header, HeaderConfig::default().render(&table).unwrap());
    assert!(header.starts_with("#pragma once\n// Generated from CaseFolding-16.0.0.txt\n"));
    assert!(header.ends_with("\t};\n}\n"));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn generate_errors() {
    let dir = scratch_dir("generate_errors");
    let output = dir.join("UnicodeTables.h");

    let err = generate(dir.join("missing.txt"), &output).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "{err}");
    assert!(!output.exists());

    let input = dir.join("CaseFolding.txt");
    fs::write(&input, "0041; C; 0061;\n0042; C; 006G;\n").unwrap();
    let err = generate(&input, &output).unwrap_err();
    assert_eq!(err.to_string(), r#"line 2: invalid codepoint "006G""#);
    assert!(!output.exists());

    fs::remove_dir_all(dir).unwrap();
}

fn run_cli(args: &[&Path]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_unicode-table-gen"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn cli() {
    let dir = scratch_dir("cli");
    let input = dir.join("CaseFolding.txt");
    let output = dir.join("UnicodeTables.h");
    fs::write(&input, CASE_FOLDING).unwrap();

    let result = run_cli(&[&input, &output]);
    assert!(result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("[unicode-table-gen][INFO] parsed 14 simple case mappings"));
    let header = fs::read_to_string(&output).unwrap();
    assert!(header.contains("constexpr usize UnicodeCaseTableSize = 14;"));

    let result = run_cli(&[&dir.join("missing.txt"), &output]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("failed to parse"));

    // Exactly two positional arguments
    let result = run_cli(&[&input]);
    assert!(!result.status.success());

    fs::remove_dir_all(dir).unwrap();
}
