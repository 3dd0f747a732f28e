use serde::Serialize;

/// A recognized separator between the native and the foreign column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Delimiter(char);

impl Delimiter {
    pub fn as_char(&self) -> char {
        self.0
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            '\t' => write!(f, "\\t"),
            c => write!(f, "{}", c),
        }
    }
}

/// Outcome of looking for a delimiter on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// Exactly one recognized delimiter, splitting the line into two non-empty parts
    Found(Delimiter),
    /// No delimiter, or one that does not form a clean two-part split
    NotFound,
    /// More than one recognized delimiter character on the line
    Ambiguous,
}

/// The configured set of recognized delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterSet {
    delimiters: Vec<char>,
}

impl Default for DelimiterSet {
    fn default() -> Self {
        Self {
            delimiters: vec!['|', ';'],
        }
    }
}

impl DelimiterSet {
    pub fn new(delimiters: impl IntoIterator<Item = char>) -> Result<Self, String> {
        let mut unique: Vec<char> = Vec::new();
        for c in delimiters {
            if c.is_alphanumeric() || c == ' ' {
                return Err(format!("'{}' cannot be used as a delimiter", c));
            }
            if !unique.contains(&c) {
                unique.push(c);
            }
        }

        if unique.is_empty() {
            return Err("At least one delimiter is required".to_string());
        }

        Ok(Self { delimiters: unique })
    }

    /// Parses a configuration value such as `|;` or `|;,\t`.
    pub fn parse(spec: &str) -> Result<Self, String> {
        let expanded = spec.replace("\\t", "\t");
        Self::new(expanded.chars().filter(|c| *c != ' '))
    }

    pub fn chars(&self) -> &[char] {
        &self.delimiters
    }

    /// Delimiter used when writing pairs back out
    pub fn primary(&self) -> Delimiter {
        Delimiter(self.delimiters[0])
    }

    pub fn detect(&self, line: &str) -> Detection {
        let mut present = self.delimiters.iter().filter(|d| line.contains(**d));

        let Some(&candidate) = present.next() else {
            return Detection::NotFound;
        };
        if present.next().is_some() {
            return Detection::Ambiguous;
        }

        let delimiter = Delimiter(candidate);
        match split_pair(line, delimiter) {
            Some(_) => Detection::Found(delimiter),
            None => Detection::NotFound,
        }
    }
}

/// Splits a line into exactly two non-empty trimmed parts.
pub fn split_pair(line: &str, delimiter: Delimiter) -> Option<(String, String)> {
    let parts: Vec<&str> = line.split(delimiter.as_char()).map(str::trim).collect();
    match parts.as_slice() {
        [native, foreign] if !native.is_empty() && !foreign.is_empty() => {
            Some((native.to_string(), foreign.to_string()))
        }
        _ => None,
    }
}
