//! Sentence-boundary text segmentation for speech synthesis.
//!
//! Long text is split into speech-friendly chunks at natural pause points:
//! sentence endings (`.` `!` `?` followed by whitespace or end of input),
//! newline runs, semicolons and colons. Common abbreviations are masked
//! before splitting so their internal periods never terminate a chunk, and
//! decimal numbers survive because a digit directly after a period never
//! satisfies the boundary condition.

use once_cell::sync::Lazy;
use regex::Regex;

/// Title, organizational and conventional abbreviations. These are masked
/// whole, including the final period: they never end a chunk.
const MASKED_ABBREVIATIONS: &[&str] = &[
    "Dr.", "Mr.", "Mrs.", "Ms.", "Prof.", "Sr.", "Jr.", "Inc.", "Ltd.", "Corp.", "vs.", "etc.",
    "e.g.", "i.e.",
];

/// Dotted acronyms. Internal periods are masked but the final period stays
/// live, so an acronym at the end of a sentence still terminates it.
const ACRONYM_ABBREVIATIONS: &[&str] = &[
    "U.S.A.", "U.K.", "A.I.", "Ph.D.", "M.D.", "B.A.", "M.A.", "B.S.", "M.S.",
];

/// Chunk boundaries: sentence-ending punctuation followed by whitespace or
/// end of input, newline runs, `;` + whitespace, and `:` + one whitespace.
static BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?](?:\s+|$)|\n+|;\s+|:\s").expect("boundary regex is valid"));

static MASKED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    MASKED_ABBREVIATIONS
        .iter()
        .map(|abbrev| compile_abbreviation(abbrev))
        .collect()
});

static ACRONYM_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ACRONYM_ABBREVIATIONS
        .iter()
        .map(|abbrev| compile_abbreviation(abbrev))
        .collect()
});

fn compile_abbreviation(abbrev: &str) -> Regex {
    Regex::new(&format!(r"\b{}", regex::escape(abbrev))).expect("abbreviation pattern is valid")
}

/// One masked abbreviation occurrence: placeholder token and the text it
/// restores to.
struct Replacement {
    placeholder: String,
    original: &'static str,
}

/// Split `text` into speech-ready chunks.
///
/// Returns an empty vector for empty or whitespace-only input. Otherwise
/// every chunk is non-empty after trimming, reading order is preserved, and
/// if no boundary is found the whole trimmed input comes back as a single
/// chunk; non-trivial text is never silently dropped.
pub fn segment(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let (masked, replacements) = mask_abbreviations(text);

    let mut pieces: Vec<&str> = Vec::new();
    let mut cursor = 0usize;
    for found in BOUNDARY.find_iter(&masked) {
        // Cut point depends on which branch matched: sentence punctuation
        // and semicolons stay with the preceding chunk, newlines are
        // discarded, a colon keeps its one trailing whitespace (trimmed off
        // below).
        let (cut, next) = match found.as_str().as_bytes()[0] {
            b'.' | b'!' | b'?' | b';' => (found.start() + 1, found.end()),
            b'\n' => (found.start(), found.end()),
            _ => (found.end(), found.end()),
        };
        if cut > cursor {
            pieces.push(&masked[cursor..cut]);
        }
        cursor = next;
    }
    if cursor < masked.len() {
        pieces.push(&masked[cursor..]);
    }

    let mut result = Vec::new();
    for piece in pieces {
        let restored = restore_abbreviations(piece, &replacements);
        let cleaned = restored.trim();
        if !cleaned.is_empty() {
            result.push(cleaned.to_string());
        }
    }

    // Nothing survived the split: hand back the whole input as one chunk.
    if result.is_empty() {
        return vec![trimmed.to_string()];
    }

    result
}

fn mask_abbreviations(text: &str) -> (String, Vec<Replacement>) {
    let mut masked = text.to_string();
    let mut replacements = Vec::new();

    // Acronyms first: their placeholder keeps the final period live so a
    // sentence ending in "U.S.A." still splits before the next sentence.
    for (index, pattern) in ACRONYM_PATTERNS.iter().enumerate() {
        if !pattern.is_match(&masked) {
            continue;
        }
        let placeholder = format!("__ACRONYM_{index}__");
        masked = pattern
            .replace_all(&masked, format!("{placeholder}."))
            .into_owned();
        let original = ACRONYM_ABBREVIATIONS[index];
        replacements.push(Replacement {
            placeholder,
            original: &original[..original.len() - 1],
        });
    }

    for (index, pattern) in MASKED_PATTERNS.iter().enumerate() {
        if !pattern.is_match(&masked) {
            continue;
        }
        let placeholder = format!("__ABBREV_{index}__");
        masked = pattern.replace_all(&masked, placeholder.as_str()).into_owned();
        replacements.push(Replacement {
            placeholder,
            original: MASKED_ABBREVIATIONS[index],
        });
    }

    (masked, replacements)
}

fn restore_abbreviations(piece: &str, replacements: &[Replacement]) -> String {
    let mut restored = piece.to_string();
    for replacement in replacements {
        if restored.contains(&replacement.placeholder) {
            restored = restored.replace(&replacement.placeholder, replacement.original);
        }
    }
    restored
}
