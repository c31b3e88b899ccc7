use once_cell::sync::Lazy;
use regex::Regex;

/// `<` up to the next `>`, across line breaks
static COMMAND_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<(.*?)>").expect("delimiter pattern is valid"));

/// Ordered commands extracted from one oracle response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    commands: Vec<String>,
}

impl Plan {
    /// Parse raw oracle text. Order is kept, duplicates are kept.
    pub fn parse(response: &str) -> Self {
        Self {
            commands: parse_plan(response),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl IntoIterator for Plan {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

/// Extract every `<...>` span from an oracle response, in order of appearance
///
/// Command contents are opaque here; surrounding whitespace is trimmed and
/// nothing else is validated.
pub fn parse_plan(response: &str) -> Vec<String> {
    COMMAND_DELIMITER
        .captures_iter(response)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}
