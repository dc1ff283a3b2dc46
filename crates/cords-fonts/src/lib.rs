//! Block glyph fonts for the cords launch sequence.

/// Height of every glyph, in rows.
pub const GLYPH_HEIGHT: usize = 7;

/// Width of every glyph, in cells.
pub const GLYPH_WIDTH: usize = 5;

/// A single glyph, one string per row.
pub type Glyph = [&'static str; GLYPH_HEIGHT];

/// Digits 0-9 (7 lines tall, 5 chars wide)
pub static DIGITS: [Glyph; 10] = [
    // 0
    [" ███ ", "█   █", "█  ██", "█ █ █", "██  █", "█   █", " ███ "],
    // 1
    ["  █  ", " ██  ", "█ █  ", "  █  ", "  █  ", "  █  ", "█████"],
    // 2
    [" ███ ", "█   █", "    █", "   █ ", "  █  ", " █   ", "█████"],
    // 3
    ["████ ", "    █", "    █", " ███ ", "    █", "    █", "████ "],
    // 4
    ["   █ ", "  ██ ", " █ █ ", "█  █ ", "█████", "   █ ", "   █ "],
    // 5
    ["█████", "█    ", "████ ", "    █", "    █", "█   █", " ███ "],
    // 6
    ["  ██ ", " █   ", "█    ", "████ ", "█   █", "█   █", " ███ "],
    // 7
    ["█████", "    █", "   █ ", "  █  ", " █   ", " █   ", " █   "],
    // 8
    [" ███ ", "█   █", "█   █", " ███ ", "█   █", "█   █", " ███ "],
    // 9
    [" ███ ", "█   █", "█   █", " ████", "    █", "   █ ", " ██  "],
];

/// Letter C
pub const LETTER_C: Glyph = [" ████", "█    ", "█    ", "█    ", "█    ", "█    ", " ████"];

/// Letter O
pub const LETTER_O: Glyph = [" ███ ", "█   █", "█   █", "█   █", "█   █", "█   █", " ███ "];

/// Letter R
pub const LETTER_R: Glyph = ["████ ", "█   █", "█   █", "████ ", "█ █  ", "█  █ ", "█   █"];

/// Letter D
pub const LETTER_D: Glyph = ["████ ", "█   █", "█   █", "█   █", "█   █", "█   █", "████ "];

/// Letter S
pub const LETTER_S: Glyph = [" ████", "█    ", "█    ", " ███ ", "    █", "    █", "████ "];

/// Blank glyph, also used for characters the font does not cover.
pub const BLANK: Glyph = ["     "; GLYPH_HEIGHT];

/// Launch logo shown next to the title (7 lines tall, 9 chars wide).
pub const LOGO: [&str; GLYPH_HEIGHT] = [
    "   ▄█▄   ",
    " ▄█▀ ▀█▄ ",
    "█▀ ▄█▄ ▀█",
    "█  ███  █",
    "█▄ ▀█▀ ▄█",
    " ▀█▄ ▄█▀ ",
    "   ▀█▀   ",
];

/// Look up the glyph for a character, case-insensitively.
pub fn glyph(ch: char) -> Option<&'static Glyph> {
    match ch.to_ascii_uppercase() {
        d @ '0'..='9' => Some(&DIGITS[(d as u8 - b'0') as usize]),
        'C' => Some(&LETTER_C),
        'O' => Some(&LETTER_O),
        'R' => Some(&LETTER_R),
        'D' => Some(&LETTER_D),
        'S' => Some(&LETTER_S),
        ' ' => Some(&BLANK),
        _ => None,
    }
}

/// Build the block art for a single digit.
///
/// Values above 9 render their last decimal digit.
pub fn digit_art(value: u8) -> Vec<String> {
    DIGITS[(value % 10) as usize]
        .iter()
        .map(|row| row.to_string())
        .collect()
}

/// Build block art for a word, one glyph per character separated by a space.
///
/// # Returns
/// A vector of [`GLYPH_HEIGHT`] strings. An empty word yields empty rows.
pub fn word_art(text: &str) -> Vec<String> {
    let glyphs: Vec<&Glyph> = text.chars().map(|c| glyph(c).unwrap_or(&BLANK)).collect();

    (0..GLYPH_HEIGHT)
        .map(|row| {
            glyphs
                .iter()
                .map(|g| g[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Width in cells of the art produced by [`word_art`] for `glyph_count` glyphs.
pub fn word_width(glyph_count: usize) -> usize {
    if glyph_count == 0 {
        0
    } else {
        glyph_count * GLYPH_WIDTH + (glyph_count - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_rows_have_uniform_width() {
        let all = DIGITS
            .iter()
            .chain([&LETTER_C, &LETTER_O, &LETTER_R, &LETTER_D, &LETTER_S, &BLANK]);
        for g in all {
            for row in g {
                assert_eq!(row.chars().count(), GLYPH_WIDTH, "row {row:?}");
            }
        }
        for row in LOGO {
            assert_eq!(row.chars().count(), 9);
        }
    }

    #[test]
    fn test_word_art_title() {
        let art = word_art("CORDS");
        assert_eq!(art.len(), GLYPH_HEIGHT);
        for line in &art {
            assert_eq!(line.chars().count(), word_width(5));
        }
        assert!(art[0].starts_with(LETTER_C[0]));
    }

    #[test]
    fn test_digit_art_and_lookup() {
        assert_eq!(digit_art(6)[3], DIGITS[6][3]);
        assert_eq!(glyph('s'), Some(&LETTER_S));
        assert_eq!(glyph('?'), None);
        assert_eq!(word_width(0), 0);
        assert!(word_art("").iter().all(|l| l.is_empty()));
    }
}
