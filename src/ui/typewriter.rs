//! Character-by-character reveal of freshly produced text.

use std::io::{self, Write};
use std::time::Duration;

/// Writes `text` one character at a time, pausing `delay` between them.
///
/// A zero delay writes everything at once.
pub async fn reveal<W: Write>(out: &mut W, text: &str, delay: Duration) -> io::Result<()> {
    if delay.is_zero() {
        out.write_all(text.as_bytes())?;
        return out.flush();
    }

    let mut buf = [0u8; 4];
    for ch in text.chars() {
        out.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
        out.flush()?;
        if !ch.is_whitespace() {
            tokio::time::sleep(delay).await;
        }
    }
    Ok(())
}
