pub mod diskstats;
pub mod mounts;
pub mod statfs;

use std::io::{self, BufRead};

/// Lines of `reader` with `\n`/`\r\n` stripped. Bytes that are not UTF-8
/// become U+FFFD instead of failing the read; only real I/O errors surface.
pub(crate) fn lossy_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader.split(b'\n').map(|line| {
        line.map(|mut bytes| {
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            String::from_utf8_lossy(&bytes).into_owned()
        })
    })
}
