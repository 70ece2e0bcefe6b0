use std::collections::HashMap;

/// Hinglish ingredient names shipped with the binary.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("aloo", "potato"),
    ("pyaaz", "onion"),
    ("mirchi", "chili"),
    ("tamatar", "tomato"),
    ("jeera", "cumin"),
    ("dhania", "coriander"),
    ("haldi", "turmeric"),
    ("tel", "oil"),
    ("rajma", "kidney beans"),
    ("lahsun", "garlic"),
    ("adrak", "ginger"),
    ("murgh", "chicken"),
    ("nariyal", "coconut"),
    ("masala", "spices"),
    ("dal", "lentils"),
    ("palak", "spinach"),
    ("paneer", "cottage cheese"),
    ("malai", "cream"),
    ("machli", "fish"),
    ("ghee", "clarified butter"),
];

/// Immutable mapping from a lowercase Hinglish term to its canonical
/// English ingredient name.
///
/// Built once at startup and shared by reference; lookups are exact
/// string matches against the already-lowercased input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        Self::from_pairs(
            BUILTIN_ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string())),
        )
    }

    /// An empty table; every token passes through unchanged.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Build a table from `(hinglish, english)` pairs. Keys and values are
    /// stored lowercased; a later pair replaces an earlier one.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(from, to)| (from.trim().to_lowercase(), to.trim().to_lowercase()))
            .collect();
        Self { entries }
    }

    /// Return a new table with `overrides` layered on top of this one.
    pub fn extended<I>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut entries = self.entries.clone();
        entries.extend(Self::from_pairs(overrides).entries);
        Self { entries }
    }

    /// Canonical term for an already trimmed, lowercased token.
    pub fn lookup(&self, term: &str) -> Option<&str> {
        self.entries.get(term).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert comma-separated ingredient text into canonical tokens.
    ///
    /// Each piece is trimmed and lowercased, then substituted through the
    /// table if it is a known alias. Empty pieces are dropped; order and
    /// duplicates are kept. Never fails.
    pub fn normalize(&self, raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|piece| {
                let term = piece.trim().to_lowercase();
                match self.lookup(&term) {
                    Some(canonical) => canonical.to_string(),
                    None => term,
                }
            })
            .filter(|token| !token.is_empty())
            .collect()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}
