//! Lightweight language detection for stored messages.
//!
//! A script census decides between non-Latin languages; Latin text is scored
//! against short stop-word lists plus a few diacritics that only one of the
//! candidate languages uses. Anything unrecognized falls back to English.

use dumai_types::chat::Language;

/// Tag returned for Latin-script text that matches no other candidate.
const FALLBACK: &str = "en";

/// Latin-script candidates, in tie-break order.
const LATIN_STOP_WORDS: &[(&str, &[&str])] = &[
    (
        "en",
        &[
            "the", "is", "are", "and", "what", "how", "why", "you", "your", "of", "to", "it",
            "my", "do", "does", "this", "that", "with", "can", "i",
        ],
    ),
    (
        "es",
        &[
            "el", "la", "los", "las", "es", "que", "qué", "y", "de", "por", "cómo", "como",
            "para", "un", "una", "hola", "está", "estoy", "yo", "tú", "con", "del",
        ],
    ),
    (
        "fr",
        &[
            "le", "la", "les", "est", "et", "je", "tu", "vous", "de", "des", "un", "une",
            "bonjour", "pourquoi", "comment", "quoi", "que", "qui", "avec", "pas", "c'est",
        ],
    ),
    (
        "de",
        &[
            "der", "die", "das", "ist", "und", "ich", "du", "nicht", "wie", "was", "warum", "ein",
            "eine", "hallo", "mit", "zu", "sie", "es",
        ],
    ),
    (
        "pt",
        &[
            "o", "a", "os", "as", "é", "que", "e", "de", "não", "você", "olá", "como", "por",
            "para", "um", "uma", "com", "do", "da", "obrigado",
        ],
    ),
    (
        "it",
        &[
            "il", "lo", "la", "gli", "è", "che", "e", "di", "non", "sono", "ciao", "come",
            "perché", "un", "una", "per", "con", "del", "della",
        ],
    ),
];

#[derive(Debug, Default)]
struct ScriptCensus {
    latin: usize,
    cyrillic: usize,
    arabic: usize,
    devanagari: usize,
    hangul: usize,
    kana: usize,
    han: usize,
}

impl ScriptCensus {
    fn of(text: &str) -> Self {
        let mut census = Self::default();
        for c in text.chars() {
            match c as u32 {
                0x0400..=0x04FF => census.cyrillic += 1,
                0x0600..=0x06FF => census.arabic += 1,
                0x0900..=0x097F => census.devanagari += 1,
                0x1100..=0x11FF | 0x3130..=0x318F | 0xAC00..=0xD7AF => census.hangul += 1,
                0x3040..=0x30FF => census.kana += 1,
                0x4E00..=0x9FFF => census.han += 1,
                _ if c.is_alphabetic() => census.latin += 1,
                _ => {}
            }
        }
        census
    }

    /// Dominant non-Latin script tag, if any script outweighs Latin letters.
    fn non_latin_tag(&self) -> Option<&'static str> {
        // Japanese mixes kana with kanji, so any kana wins over plain Han.
        let japanese = if self.kana > 0 { self.kana + self.han } else { 0 };
        let chinese = if self.kana > 0 { 0 } else { self.han };

        let candidates = [
            ("ja", japanese),
            ("zh", chinese),
            ("ko", self.hangul),
            ("ru", self.cyrillic),
            ("ar", self.arabic),
            ("hi", self.devanagari),
        ];

        candidates
            .into_iter()
            .filter(|(_, count)| *count > 0 && *count >= self.latin)
            .max_by_key(|(_, count)| *count)
            .map(|(tag, _)| tag)
    }
}

fn diacritic_bonus(tag: &str, text: &str) -> usize {
    let markers: &[char] = match tag {
        "es" => &['ñ', '¿', '¡'],
        "fr" => &['ç', 'œ', 'ê', 'è', 'ë', 'î', 'û'],
        "de" => &['ß', 'ä', 'ö', 'ü'],
        "pt" => &['ã', 'õ'],
        "it" => &['ì', 'ò'],
        _ => &[],
    };
    text.chars().filter(|c| markers.contains(c)).count() * 2
}

fn latin_tag(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !(c.is_alphabetic() || c == '\''))
        .filter(|w| !w.is_empty())
        .collect();

    let mut best = (FALLBACK, 0usize);
    for (tag, stop_words) in LATIN_STOP_WORDS {
        let hits = words.iter().filter(|w| stop_words.contains(*w)).count();
        let score = hits + diacritic_bonus(tag, &lowered);
        if score > best.1 {
            best = (*tag, score);
        }
    }
    best.0
}

/// Detect the language of a message.
///
/// Returns [`Language::UNDETERMINED`] for empty or whitespace-only text.
pub fn detect_language(text: &str) -> Language {
    if text.trim().is_empty() {
        return Language::undetermined();
    }

    let census = ScriptCensus::of(text);
    if let Some(tag) = census.non_latin_tag() {
        return Language::new(tag);
    }

    Language::new(latin_tag(text))
}
