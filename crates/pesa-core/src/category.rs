//! The closed set of categories a transaction may be filed under

use std::fmt;

/// Categories accepted when none are configured
pub const DEFAULT_CATEGORIES: [&str; 5] = ["food", "travel", "savings", "church", "investments"];

/// Ordered, case-insensitive set of valid categories
///
/// Order is preserved for listings ("Use: food, travel, ...") and summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    /// Build a set from names; blanks and repeats are dropped, names are lower-cased
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self { names: Vec::new() };
        for name in names {
            let name = name.as_ref().trim().to_lowercase();
            if !name.is_empty() && !set.names.contains(&name) {
                set.names.push(name);
            }
        }
        set
    }

    /// Parse a comma-separated list such as `food, rent, fees`
    ///
    /// Returns `None` when the list holds no usable names.
    pub fn parse_list(list: &str) -> Option<Self> {
        let set = Self::new(list.split(','));
        (!set.names.is_empty()).then_some(set)
    }

    pub fn is_valid(&self, category: &str) -> bool {
        let category = category.trim().to_lowercase();
        self.names.iter().any(|n| *n == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES)
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(", "))
    }
}
