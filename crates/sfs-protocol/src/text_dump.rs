// crates/sfs-protocol/src/text_dump.rs

//! Human-readable renderings for tools and logs.
//!
//! - [`dump_object`]: typed, indented tree of an object
//! - [`hex_dump`]: classic 16-bytes-per-row hex + ASCII view
//!
//! Object dump format:
//!
//! ```text
//! (sfs_object) size: 3
//!   (sfs_array) e:
//!     (sfs_array) [0]:
//!       (null) [0]: null
//!       ...
//!   (int) r: 42
//!   (short) l: 500
//! ```

use std::fmt::Write;

use sfs_core::{SfsArray, SfsObject, SfsValue};

const INDENT: &str = "  ";

/// Render an object as an indented, typed tree.
pub fn dump_object(obj: &SfsObject) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "(sfs_object) size: {}", obj.len());
    write_object_entries(obj, 1, &mut out);
    out
}

/// Render an array as an indented, typed tree.
pub fn dump_array(arr: &SfsArray) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "(sfs_array) size: {}", arr.len());
    write_array_items(arr, 1, &mut out);
    out
}

fn write_object_entries(obj: &SfsObject, depth: usize, out: &mut String) {
    for (key, value) in obj.iter() {
        write_entry(key, value, depth, out);
    }
}

fn write_array_items(arr: &SfsArray, depth: usize, out: &mut String) {
    for (i, value) in arr.iter().enumerate() {
        write_entry(&format!("[{}]", i), value, depth, out);
    }
}

fn write_entry(label: &str, value: &SfsValue, depth: usize, out: &mut String) {
    let pad = INDENT.repeat(depth);
    match value {
        SfsValue::Object(o) => {
            let _ = writeln!(out, "{}({}) {}:", pad, value.type_name(), label);
            write_object_entries(o, depth + 1, out);
        }
        SfsValue::Array(a) => {
            let _ = writeln!(out, "{}({}) {}:", pad, value.type_name(), label);
            write_array_items(a, depth + 1, out);
        }
        other => {
            let _ = writeln!(out, "{}({}) {}: {}", pad, other.type_name(), label, other);
        }
    }
}

/// Hex + ASCII view, 16 bytes per row.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();

    for (row, chunk) in bytes.chunks(16).enumerate() {
        let _ = write!(out, "{:08x}  ", row * 16);

        for i in 0..16 {
            match chunk.get(i) {
                Some(b) => {
                    let _ = write!(out, "{:02x} ", b);
                }
                None => out.push_str("   "),
            }
            if i == 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.extend(chunk.iter().map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        }));
        out.push('\n');
    }

    out
}
