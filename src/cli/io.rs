//! JSON output for one-shot commands

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write `value` as one JSON line to `out`
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Write `value` as one JSON line to stdout
pub fn write_response<T: Serialize>(value: &T) -> CliResult<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_json(&mut lock, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_single_line() {
        let mut buf = Vec::new();
        write_json(&mut buf, &serde_json::json!({"models": ["user"]})).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\"models\":[\"user\"]}\n");
    }
}
