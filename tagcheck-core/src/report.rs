// Result map serialization

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;
use tagcheck_scanner::ResultMap;
use tagcheck_scanner::error::Result;

const INDENT: &[u8] = b"    ";

/// Render the result map as pretty JSON indented with four spaces.
/// Keys appear in insertion order.
pub fn render(results: &ResultMap) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    results.serialize(&mut serializer)?;

    Ok(String::from_utf8(buffer)?)
}

/// Write the rendered report followed by a newline
pub fn write_report<W: Write>(results: &ResultMap, mut out: W) -> Result<()> {
    let rendered = render(results)?;
    writeln!(out, "{}", rendered)?;
    out.flush()?;
    Ok(())
}
