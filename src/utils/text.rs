use std::io::{BufRead, Result};

/// Feeds each line of `reader` to `f` without its line terminator.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD, so a stray byte in
/// a free-text column never hides the rest of the input. Only read failures
/// are returned as errors.
pub fn for_each_lossy_line<R, F>(mut reader: R, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        f(line.trim_end_matches(['\n', '\r']));
    }
}
