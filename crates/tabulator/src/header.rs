//! Header normalization
//!
//! Turns raw header cells into field identifiers: trimmed, whitespace runs
//! collapsed to `_`, transliterated to ASCII and lowercased. Identifiers that
//! collide within one header row get a numeric suffix.

use std::collections::HashSet;

/// Converts header text into an ASCII-safe spelling.
///
/// Passed explicitly to [`HeaderNormalizer`]; any `Fn(&str) -> String`
/// closure works as well.
pub trait Transliterate {
    fn transliterate(&self, text: &str) -> String;
}

impl<F> Transliterate for F
where
    F: Fn(&str) -> String,
{
    fn transliterate(&self, text: &str) -> String {
        self(text)
    }
}

/// Static Latin folding table.
///
/// Covers Latin-1 Supplement, Latin Extended-A and the usual typographic
/// punctuation. Anything else outside ASCII becomes `?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiFolding;

impl AsciiFolding {
    const REPLACEMENT: &'static str = "?";

    #[must_use]
    pub fn fold(c: char) -> Option<&'static str> {
        let folded = match c {
            'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => "A",
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
            'Æ' => "AE",
            'æ' => "ae",
            'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => "C",
            'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
            'Ð' | 'Ď' | 'Đ' => "D",
            'ð' | 'ď' | 'đ' => "d",
            'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => "E",
            'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
            'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => "G",
            'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
            'Ĥ' | 'Ħ' => "H",
            'ĥ' | 'ħ' => "h",
            'Ì' | 'Í' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => "I",
            'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
            'Ĳ' => "IJ",
            'ĳ' => "ij",
            'Ĵ' => "J",
            'ĵ' => "j",
            'Ķ' => "K",
            'ķ' | 'ĸ' => "k",
            'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => "L",
            'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
            'Ñ' | 'Ń' | 'Ņ' | 'Ň' | 'Ŋ' => "N",
            'ñ' | 'ń' | 'ņ' | 'ň' | 'ŋ' => "n",
            'ŉ' => "'n",
            'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => "O",
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
            'Œ' => "OE",
            'œ' => "oe",
            'Ŕ' | 'Ŗ' | 'Ř' => "R",
            'ŕ' | 'ŗ' | 'ř' => "r",
            'Ś' | 'Ŝ' | 'Ş' | 'Š' => "S",
            'ś' | 'ŝ' | 'ş' | 'š' | 'ſ' => "s",
            'ß' => "ss",
            'Ţ' | 'Ť' | 'Ŧ' => "T",
            'ţ' | 'ť' | 'ŧ' => "t",
            'Þ' => "Th",
            'þ' => "th",
            'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => "U",
            'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
            'Ŵ' => "W",
            'ŵ' => "w",
            'Ý' | 'Ŷ' | 'Ÿ' => "Y",
            'ý' | 'ÿ' | 'ŷ' => "y",
            'Ź' | 'Ż' | 'Ž' => "Z",
            'ź' | 'ż' | 'ž' => "z",
            '×' => "x",
            '‘' | '’' | '‚' | '′' => "'",
            '“' | '”' | '„' | '″' => "\"",
            '‐' | '‑' | '‒' | '–' | '—' | '―' => "-",
            '…' => "...",
            '«' => "<<",
            '»' => ">>",
            _ => return None,
        };
        Some(folded)
    }
}

impl Transliterate for AsciiFolding {
    fn transliterate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if c.is_ascii() {
                out.push(c);
            } else {
                out.push_str(Self::fold(c).unwrap_or(Self::REPLACEMENT));
            }
        }
        out
    }
}

/// Builds field identifiers from header cells.
#[derive(Debug, Clone, Default)]
pub struct HeaderNormalizer<T = AsciiFolding> {
    transliterator: T,
}

impl HeaderNormalizer {
    /// Normalizer using the built-in [`AsciiFolding`] table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Transliterate> HeaderNormalizer<T> {
    pub fn with_transliterator(transliterator: T) -> Self {
        HeaderNormalizer { transliterator }
    }

    /// Normalize a single header cell.
    ///
    /// # Example
    /// ```
    /// use tabulator::HeaderNormalizer;
    ///
    /// let normalizer = HeaderNormalizer::new();
    /// assert_eq!(normalizer.normalize("  Première   Année "), "premiere_annee");
    /// ```
    pub fn normalize(&self, raw: &str) -> String {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join("_");
        self.transliterator.transliterate(&collapsed).to_lowercase()
    }

    /// Normalize a whole header row, suffixing duplicates with `_1`, `_2`, ...
    ///
    /// The suffix is appended to the raw text before renormalizing, so
    /// `["Name", "name"]` becomes `["name", "name_1"]`.
    pub fn normalize_row<S: AsRef<str>>(&self, cells: &[S]) -> Vec<String> {
        let mut accepted: HashSet<String> = HashSet::with_capacity(cells.len());
        let mut fields = Vec::with_capacity(cells.len());

        for raw in cells {
            let raw = raw.as_ref();
            let base = self.normalize(raw);
            let mut candidate = base.clone();
            let mut suffix = 1usize;

            while accepted.contains(&candidate) {
                candidate = self.normalize(&format!("{raw}_{suffix}"));
                // A transliterator may drop or mangle the suffix; `{base}_{suffix}`
                // is distinct for every suffix, so the loop always ends.
                if candidate == base || accepted.contains(&candidate) {
                    candidate = format!("{base}_{suffix}");
                }
                suffix += 1;
            }

            if candidate != base {
                tracing::debug!("header {:?} renamed to {:?} to avoid a collision", raw, candidate);
            }
            accepted.insert(candidate.clone());
            fields.push(candidate);
        }

        fields
    }
}
