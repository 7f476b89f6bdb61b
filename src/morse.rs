//! Text to Morse code translation

use std::{fmt, str::Chars};

use parse_display::Display;

/// A single Morse mark, emitted as one light pulse
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Short pulse, one base unit
    #[display(".")]
    Dit,
    /// Long pulse, three base units
    #[display("-")]
    Dah,
}

/// Marks of a single character, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern(&'static str);

impl Pattern {
    /// Look up the pattern for a character. Letters are matched case-insensitively.
    pub fn of(c: char) -> Option<Self> {
        let code = match c.to_ascii_uppercase() {
            'A' => ".-",
            'B' => "-...",
            'C' => "-.-.",
            'D' => "-..",
            'E' => ".",
            'F' => "..-.",
            'G' => "--.",
            'H' => "....",
            'I' => "..",
            'J' => ".---",
            'K' => "-.-",
            'L' => ".-..",
            'M' => "--",
            'N' => "-.",
            'O' => "---",
            'P' => ".--.",
            'Q' => "--.-",
            'R' => ".-.",
            'S' => "...",
            'T' => "-",
            'U' => "..-",
            'V' => "...-",
            'W' => ".--",
            'X' => "-..-",
            'Y' => "-.--",
            'Z' => "--..",
            '0' => "-----",
            '1' => ".----",
            '2' => "..---",
            '3' => "...--",
            '4' => "....-",
            '5' => ".....",
            '6' => "-....",
            '7' => "--...",
            '8' => "---..",
            '9' => "----.",
            ',' => "--..--",
            '.' => ".-.-.-",
            '?' => "..--..",
            ';' => "-.-.-.",
            ':' => "---...",
            '\'' => ".----.",
            '-' => "-....-",
            '/' => "-..-.",
            '(' | ')' => "-.--.-",
            '_' => "..--.-",
            _ => return None,
        };

        Some(Self(code))
    }

    pub fn marks(&self) -> impl Iterator<Item = Mark> + Clone + 'static {
        self.0.bytes().map(|b| if b == b'-' { Mark::Dah } else { Mark::Dit })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Encoded Morse symbol
///
/// The gap between two letters is not represented: it is implied between two consecutive
/// [Symbol::Character] items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Character(Pattern),
    WordSpace,
}

impl Symbol {
    fn from_char(c: char) -> Option<Self> {
        if c == ' ' {
            Some(Self::WordSpace)
        } else {
            Pattern::of(c).map(Self::Character)
        }
    }

    /// Marks to emit for this symbol. Word spaces have none.
    pub fn marks(&self) -> impl Iterator<Item = Mark> + Clone + 'static {
        match self {
            Self::Character(pattern) => Some(pattern.marks()),
            Self::WordSpace => None,
        }
        .into_iter()
        .flatten()
    }
}

/// Iterator over the Morse symbols of a text, see [encode]
#[derive(Debug, Clone)]
pub struct Encoder<'t> {
    chars: Chars<'t>,
}

impl Iterator for Encoder<'_> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        self.chars.by_ref().find_map(Symbol::from_char)
    }
}

/// Translate `text` to Morse symbols
///
/// Characters outside of the supported alphabet are skipped. The returned iterator is lazy and
/// can be cloned to walk the sequence again.
pub fn encode(text: &str) -> Encoder<'_> {
    Encoder { chars: text.chars() }
}

/// Total number of marks (light pulses) in a symbol sequence
pub fn count_marks(symbols: impl IntoIterator<Item = Symbol>) -> usize {
    symbols.into_iter().map(|symbol| symbol.marks().count()).sum()
}
