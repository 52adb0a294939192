//! Styled terminal text.

/// ANSI SGR sequences.
pub mod colors {
    /// Bold.
    pub const BOLD: &str = "\x1b[1m";
    /// Dim.
    pub const DIM: &str = "\x1b[2m";
    /// Green foreground.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow foreground, also used for matches.
    pub const YELLOW: &str = "\x1b[33m";
    /// Cyan foreground.
    pub const CYAN: &str = "\x1b[36m";
    /// Clears every attribute.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in the given sequences and a reset.
fn paint(codes: &[&str], text: &str) -> String {
    let mut out = codes.concat();
    out.push_str(text);
    out.push_str(colors::RESET);
    out
}

/// Section header: bold cyan.
pub fn header(text: &str) -> String {
    paint(&[colors::BOLD, colors::CYAN], text)
}

/// Subsection header: bold.
pub fn subheader(text: &str) -> String {
    paint(&[colors::BOLD], text)
}

/// Secondary information.
pub fn dim(text: &str) -> String {
    paint(&[colors::DIM], text)
}

/// Green.
pub fn success(text: &str) -> String {
    paint(&[colors::GREEN], text)
}

/// Yellow.
pub fn warning(text: &str) -> String {
    paint(&[colors::YELLOW], text)
}

/// Colors text with a 24-bit foreground.
pub fn rgb(text: &str, (r, g, b): (u8, u8, u8)) -> String {
    paint(&[&format!("\x1b[38;2;{r};{g};{b}m")], text)
}

/// A small block in the given color, used to preview annotation colors.
pub fn swatch(color: (u8, u8, u8)) -> String {
    rgb("■", color)
}
