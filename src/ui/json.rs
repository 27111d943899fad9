//! NDJSON output for `--json`

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;

/// Serialize `payload` with a `"command"` field added, one object per line
pub fn write_line(out: &mut impl Write, command: &str, payload: &impl Serialize) -> io::Result<()> {
    let mut value = serde_json::to_value(payload).map_err(io::Error::other)?;
    if let Value::Object(map) = &mut value {
        map.insert("command".to_string(), Value::String(command.to_string()));
    }
    serde_json::to_writer(&mut *out, &value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}

/// Write one line to stdout
pub fn emit(command: &str, payload: &impl Serialize) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_line(&mut out, command, payload)
}
