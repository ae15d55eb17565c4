//! Hex line rendering (pure core).
//!
//! Maps loaded page content to aligned offset/hex/ASCII display lines.
//! No hidden state: identical inputs always produce identical output.

/// Bytes per display line.
pub const BYTES_PER_LINE: usize = 16;

/// One rendered line of the hex view.
///
/// Holds the raw bytes; the three display columns are pure functions of
/// the fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    /// Absolute byte offset of the first byte on this line. A multiple of
    /// [`BYTES_PER_LINE`] whenever the page size is (the default is).
    pub offset: u64,
    /// The raw bytes on this line (1 to [`BYTES_PER_LINE`]).
    pub bytes: Vec<u8>,
}

impl DisplayLine {
    /// Offset column: 8 lowercase hex digits, zero-padded.
    pub fn offset_text(&self) -> String {
        format!("{:08x}", self.offset)
    }

    /// Hex column: two lowercase hex digits per byte, single-space
    /// separated, in byte order.
    pub fn hex_text(&self) -> String {
        let mut out = String::with_capacity(self.bytes.len() * 3);
        for (i, b) in self.bytes.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&format!("{b:02x}"));
        }
        out
    }

    /// ASCII column: printable ASCII (`0x20..=0x7e`) verbatim, everything
    /// else as `.`, no separators.
    pub fn ascii_text(&self) -> String {
        self.bytes
            .iter()
            .map(|&b| if (0x20..=0x7e).contains(&b) { b as char } else { '.' })
            .collect()
    }
}

/// Render loaded pages as display lines.
///
/// Iterates pages in index order, chunking each into
/// [`BYTES_PER_LINE`]-byte lines; the absolute offset of a line is
/// `page_index * page_size + offset_within_page`. Empty pages (only ever
/// the single page of an empty source) produce no lines.
pub fn render(pages: &[Vec<u8>], page_size: usize) -> Vec<DisplayLine> {
    let mut lines = Vec::new();
    for (page_index, page) in pages.iter().enumerate() {
        let page_base = page_index as u64 * page_size as u64;
        for (chunk_index, chunk) in page.chunks(BYTES_PER_LINE).enumerate() {
            lines.push(DisplayLine {
                offset: page_base + (chunk_index * BYTES_PER_LINE) as u64,
                bytes: chunk.to_vec(),
            });
        }
    }
    lines
}
