/// Sanitize a page's text layer before table detection.
/// Normalizes line endings and exotic spaces, strips control and zero-width
/// characters. Tabs, blank lines and interior spacing are preserved since
/// the table scanners rely on them.
pub fn sanitize_page_text(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter_map(|c| match c {
            '\n' | '\t' => Some(c),
            // NBSP, narrow NBSP, figure space, thin space
            '\u{00A0}' | '\u{202F}' | '\u{2007}' | '\u{2009}' => Some(' '),
            // Zero-width space/joiners, BOM
            '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}' => None,
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect::<String>()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}
