use std::io::{self, Write};

use crate::testing::TOLERANCES;

/// Where to write the measurement tables, if anywhere.
pub fn get_flatten_output() -> Option<String> {
    std::env::var("FLATTEN_OUTPUT").ok()
}

pub fn print_first_row_md(output: &mut dyn Write) -> io::Result<()> {
    write!(output, "| tolerance  ")?;
    for tolerance in &TOLERANCES {
        write!(output, "|  {} ", tolerance)?;
    }
    writeln!(output, "|")?;
    write!(output, "|-----------")?;
    for _ in 0..TOLERANCES.len() {
        write!(output, "| -----:")?;
    }
    writeln!(output, "|")
}

pub fn print_row_md<T: std::fmt::Display>(output: &mut dyn Write, name: &str, vals: &[T]) -> io::Result<()> {
    write!(output, "| {} ", name)?;
    for val in vals {
        write!(output, "| {:.4} ", val)?;
    }
    writeln!(output, "|")
}

#[test]
fn markdown_rows() {
    let mut out = Vec::new();
    print_first_row_md(&mut out).unwrap();
    print_row_md(&mut out, "mid_t", &[1.0, 2.5]).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("| tolerance"));
    assert_eq!(lines[2], "| mid_t | 1.0000 | 2.5000 |");
}
