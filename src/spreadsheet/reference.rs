//! Spreadsheet column lettering and A1-style cell references.

/// Returns the conventional spreadsheet letters for a 0-based column index:
/// 0 is "A", 25 is "Z", 26 is "AA", 701 is "ZZ", 702 is "AAA".
///
/// Base-26 with no zero digit, so each extra letter shifts the index by one.
pub fn column_letters(index: usize) -> String {
    const LETTERS: usize = 26;
    if index < LETTERS {
        ((b'A' + index as u8) as char).to_string()
    } else {
        let mut name = column_letters(index / LETTERS - 1);
        name.push((b'A' + (index % LETTERS) as u8) as char);
        name
    }
}

/// Converts 0-based row and column indexes to an A1-style reference.
pub fn index_to_reference(row: usize, col: usize) -> String {
    format!("{}{}", column_letters(col), row + 1)
}

/// Parses an A1-style reference into 0-based (row, column) indexes.
/// Returns `None` for malformed references.
pub fn reference_to_index(reference: &str) -> Option<(usize, usize)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() {
        return None;
    }

    let mut col = 0usize;
    for c in letters.chars() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        col = col * 26 + (c as usize - 'A' as usize + 1);
    }
    let row = digits.parse::<usize>().ok().filter(|row| *row > 0)?;
    Some((row - 1, col - 1))
}
