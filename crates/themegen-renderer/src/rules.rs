//! Ordered literal substitution rules.
//!
//! A [`SubstitutionList`] holds `(target, replacement)` pairs in source order
//! and applies them one after another to a piece of text.

/// A single literal substitution: every occurrence of `target` becomes `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    target: String,
    replacement: String,
}

impl Rule {
    /// Create a new rule.
    #[must_use]
    pub fn new(target: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            replacement: replacement.into(),
        }
    }

    /// The exact substring to find.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The exact substring to insert.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Statistics collected while applying a [`SubstitutionList`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplyStats {
    /// Total number of occurrences replaced across all rules.
    pub replacements: usize,
    /// Targets that matched nothing at the time their rule ran, in rule order.
    pub unmatched: Vec<String>,
}

/// Ordered sequence of substitution rules.
///
/// Rules compose sequentially: each rule runs on the output of the previous
/// one, so a later target may match text introduced by an earlier replacement.
///
/// # Example
///
/// ```
/// use themegen_renderer::SubstitutionList;
///
/// let mut text = "color: $PRIMARY;".to_owned();
/// let mut rules = SubstitutionList::new();
/// rules.push("$PRIMARY", "#ff0000");
/// rules.apply(&mut text);
///
/// assert_eq!(text, "color: #ff0000;");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubstitutionList {
    rules: Vec<Rule>,
}

impl SubstitutionList {
    /// Create a new empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new list with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
        }
    }

    /// Append a rule. Rules are applied in the order they are added.
    pub fn push(&mut self, target: impl Into<String>, replacement: impl Into<String>) {
        self.rules.push(Rule::new(target, replacement));
    }

    /// Apply every rule in order, replacing all non-overlapping occurrences.
    pub fn apply(&self, text: &mut String) -> ApplyStats {
        let mut stats = ApplyStats::default();

        for rule in &self.rules {
            let count = text.matches(rule.target()).count();
            if count == 0 {
                stats.unmatched.push(rule.target().to_owned());
                continue;
            }
            *text = text.replace(rule.target(), rule.replacement());
            stats.replacements += count;
        }

        stats
    }

    /// Iterate over the rules in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Check if the list has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Get the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

impl<'a> IntoIterator for &'a SubstitutionList {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
