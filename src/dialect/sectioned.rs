//! Section/sub-section aware dialect.
//!
//! Implements the `Dialect` trait for GNU ld maps where input sections are
//! spelled `.text.name`, the first segment naming the output section and the
//! rest the sub-section. Lines carrying a size start a new contributing object,
//! whose name is the file name of the trailing path.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ClassifierState, Dialect};
use crate::config::SizeFormat;
use crate::record::{Record, Size};
use crate::utils::object_name;

/// `.section` followed by any number of `.subsection` segments.
static SUBSECTION_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\.[A-Za-z0-9_-]+)((?:\.[A-Za-z0-9_-]+)*)").unwrap());

/// Optional section token, address, optional size, trailing symbol or path.
static FIELDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:\.[A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)*)? +(0x[0-9a-fA-F]+)(?: +|$)(0x[0-9a-fA-F]+)? *(.*)$",
    )
    .unwrap()
});

const HEADERS: &[&str] = &[
    "Section",
    "Sub-Section",
    "Address",
    "Size",
    "Object",
    "Object Size",
    "Symbol",
];

/// The sectioned dialect backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sectioned;

impl Dialect for Sectioned {
    fn headers(&self) -> &'static [&'static str] {
        HEADERS
    }

    fn boundary_label(&self) -> &'static str {
        "sections"
    }

    fn classify(
        &self,
        mut state: ClassifierState,
        line: &str,
        format: SizeFormat,
    ) -> (ClassifierState, Option<Record>) {
        if let Some(caps) = SUBSECTION_START.captures(line) {
            let section = &caps[1];
            if state.section.as_deref() != Some(section) {
                tracing::debug!("Entering section {}", section);
                state.section = Some(section.to_string());
                state.boundaries += 1;
            }
            state.subsection = caps[2].to_string();
        }

        // Nothing is emitted until the first section has been seen.
        let Some(section) = state.section.clone() else {
            return (state, None);
        };
        let Some(caps) = FIELDS.captures(line) else {
            return (state, None);
        };

        state.symbols += 1;
        let address = caps[1].to_string();
        let symbol = caps.get(3).map_or("", |m| m.as_str()).to_string();
        let size = caps.get(2).map(|m| Size::from_field(m.as_str(), format));

        // Lines that omit the size share the one of the last line that had it.
        if let Some(size) = &size {
            state.object_size = size.clone();
            state.object = object_name(&symbol).to_string();
        }

        let record = Record {
            section,
            subsection: Some(state.subsection.clone()),
            address,
            size,
            object: state.object.clone(),
            object_size: state.object_size.clone(),
            symbol,
        };
        (state, Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_all(lines: &[&str], format: SizeFormat) -> (ClassifierState, Vec<Record>) {
        let mut state = ClassifierState::default();
        let mut records = Vec::new();
        for line in lines {
            let (next, record) = Sectioned.classify(state, line, format);
            state = next;
            records.extend(record);
        }
        (state, records)
    }

    const TEXT_SECTION: &[&str] = &[
        ".text           0x0000000000401000      0x185",
        " *(.text.unlikely .text.*_unlikely .text.unlikely.*)",
        " .text.startup  0x0000000000401000       0x25 /tmp/ccX/main.o",
        "                0x0000000000401000                main",
        " .text          0x0000000000401030       0x2f /usr/lib/crt1.o",
        "                0x0000000000401030                _start",
    ];

    #[test]
    fn test_text_section_rows() {
        let (state, records) = classify_all(TEXT_SECTION, SizeFormat::Decimal);
        let rows: Vec<Vec<String>> = records.iter().map(Record::fields).collect();

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], vec![".text", "", "0x0000000000401000", "389", "", "389", ""]);
        assert_eq!(
            rows[1],
            vec![".text", ".startup", "0x0000000000401000", "37", "main.o", "37", "/tmp/ccX/main.o"]
        );
        assert_eq!(
            rows[2],
            vec![".text", ".startup", "0x0000000000401000", "", "main.o", "37", "main"]
        );
        assert_eq!(
            rows[3],
            vec![".text", "", "0x0000000000401030", "47", "crt1.o", "47", "/usr/lib/crt1.o"]
        );
        assert_eq!(
            rows[4],
            vec![".text", "", "0x0000000000401030", "", "crt1.o", "47", "_start"]
        );

        assert_eq!(state.boundaries, 1);
        assert_eq!(state.symbols, 5);
    }

    #[test]
    fn test_hex_sizes_pass_through() {
        let (_, records) = classify_all(TEXT_SECTION, SizeFormat::Hex);
        assert_eq!(records[1].size, Some(Size::Hex("0x25".to_string())));
        assert_eq!(records[2].size, None);
        assert_eq!(records[2].object_size, Size::Hex("0x25".to_string()));
    }

    #[test]
    fn test_lines_before_first_section_are_skipped() {
        let lines = [
            "LOAD /usr/lib/crt1.o",
            "                0x0000000000400000                . = 0x400000",
            ".text           0x0000000000401000       0x10",
        ];
        let (state, records) = classify_all(&lines, SizeFormat::Decimal);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].section, ".text");
        assert_eq!(state.symbols, 1);
    }

    #[test]
    fn test_section_transitions_are_counted_once() {
        let lines = [
            ".text           0x0000000000401000       0x10",
            " .text.a        0x0000000000401000        0x8 a.o",
            " .text.b        0x0000000000401008        0x8 b.o",
            ".data           0x0000000000404000        0x4",
            " .data          0x0000000000404000        0x4 /obj/c.o",
            "                0x0000000000404000                counter",
        ];
        let (state, records) = classify_all(&lines, SizeFormat::Decimal);
        assert_eq!(state.boundaries, 2);
        assert_eq!(records.len(), 6);
        assert_eq!(records[2].subsection.as_deref(), Some(".b"));
        assert_eq!(records[5].section, ".data");
        assert_eq!(records[5].subsection.as_deref(), Some(""));
        assert_eq!(records[5].object, "c.o");
        assert_eq!(records[5].object_size, Size::Decimal(4));
    }

    #[test]
    fn test_section_without_address_updates_state_only() {
        let lines = [
            ".bss",
            " .bss.buffer",
            "                0x0000000000405000      0x100 /obj/buf.o",
        ];
        let (state, records) = classify_all(&lines, SizeFormat::Decimal);
        assert_eq!(state.boundaries, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].section, ".bss");
        assert_eq!(records[0].subsection.as_deref(), Some(".buffer"));
        assert_eq!(records[0].object, "buf.o");
        assert_eq!(records[0].object_size, Size::Decimal(256));
    }

    #[test]
    fn test_address_only_line_still_emits_row() {
        let lines = [
            ".text           0x0000000000401000       0x10 /obj/a.o",
            "                0x0000000000401010",
        ];
        let (_, records) = classify_all(&lines, SizeFormat::Decimal);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].address, "0x0000000000401010");
        assert_eq!(records[1].size, None);
        assert_eq!(records[1].symbol, "");
        assert_eq!(records[1].object, "a.o");
        assert_eq!(records[1].object_size, Size::Decimal(16));
    }

    #[test]
    fn test_size_carries_forward_until_replaced() {
        let lines = [
            ".data           0x0000000000404000       0x10 /obj/d.o",
            "                0x0000000000404000                first",
            "                0x0000000000404008                second",
            " .data.x        0x0000000000404010        0x4 /obj/e.o",
            "                0x0000000000404010                third",
        ];
        let (_, records) = classify_all(&lines, SizeFormat::Decimal);
        let carried: Vec<String> = records.iter().map(|r| r.object_size.to_string()).collect();
        assert_eq!(carried, vec!["16", "16", "16", "4", "4"]);
        let sizes: Vec<String> = records.iter().map(|r| r.fields()[3].clone()).collect();
        assert_eq!(sizes, vec!["16", "", "", "4", ""]);
    }

    #[test]
    fn test_initial_carried_values() {
        let lines = [
            ".text",
            "                0x0000000000401000                early",
        ];
        let (_, records) = classify_all(&lines, SizeFormat::Hex);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].object, "");
        assert_eq!(records[0].object_size, Size::Decimal(0));
    }

    #[test]
    fn test_unmatched_lines_produce_nothing() {
        let lines = [
            ".text           0x0000000000401000       0x10",
            " *(.text)",
            "",
            " FILL mask 0x90",
        ];
        let (state, records) = classify_all(&lines, SizeFormat::Decimal);
        assert_eq!(records.len(), 1);
        assert_eq!(state.symbols, 1);
    }
}
