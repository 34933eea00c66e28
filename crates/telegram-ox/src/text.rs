/// Maximum length of a `sendMessage` text, in UTF-16 code units
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Split `text` into pieces that each fit in `limit` UTF-16 code units.
///
/// Pieces break after the last newline that fits, or mid-line when a single
/// line is too long. Concatenating the pieces yields `text` again. An empty
/// input yields one empty piece.
pub fn split_text(text: &str, limit: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut rest = text;

    while utf16_len(rest) > limit {
        let mut units = 0;
        let mut cut = 0;
        for (idx, ch) in rest.char_indices() {
            if units + ch.len_utf16() > limit {
                break;
            }
            units += ch.len_utf16();
            cut = idx + ch.len_utf8();
        }

        // A limit smaller than one character still has to make progress.
        if cut == 0 {
            cut = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }

        let cut = match rest[..cut].rfind('\n') {
            Some(newline) if newline > 0 => newline + 1,
            _ => cut,
        };

        pieces.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }

    if !rest.is_empty() || pieces.is_empty() {
        pieces.push(rest.to_string());
    }
    pieces
}

fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}
