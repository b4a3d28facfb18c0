use super::list_entries;
use super::suffix_trie::SuffixTrie;
use aho_corasick::AhoCorasick;
use async_trait::async_trait;
use compact_str::CompactString;
use fancy_regex::Regex;
use rule_switcher_application::ports::{DomainMatcherBuilder, Matcher};
use rule_switcher_domain::{DomainError, QueryContext};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainPattern {
    /// `full:` exact name
    Full(String),
    /// `domain:` or bare entry; the name and everything below it
    Domain(String),
    /// `keyword:` substring anywhere in the name
    Keyword(String),
    /// `regexp:` regular expression over the name
    Regexp(String),
}

impl DomainPattern {
    pub fn parse(entry: &str) -> Result<Self, DomainError> {
        if let Some(rest) = entry.strip_prefix("full:") {
            return Ok(Self::Full(normalize_name(rest, entry)?));
        }
        if let Some(rest) = entry.strip_prefix("domain:") {
            return Ok(Self::Domain(normalize_name(rest, entry)?));
        }
        if let Some(rest) = entry.strip_prefix("keyword:") {
            if rest.is_empty() {
                return Err(DomainError::InvalidDomainPattern(entry.to_string()));
            }
            return Ok(Self::Keyword(rest.to_ascii_lowercase()));
        }
        if let Some(rest) = entry.strip_prefix("regexp:") {
            if rest.is_empty() {
                return Err(DomainError::InvalidDomainPattern(entry.to_string()));
            }
            return Ok(Self::Regexp(rest.to_string()));
        }
        if entry.contains(':') {
            return Err(DomainError::InvalidDomainPattern(format!(
                "unknown pattern prefix in '{}'",
                entry
            )));
        }
        Ok(Self::Domain(normalize_name(entry, entry)?))
    }
}

fn normalize_name(name: &str, entry: &str) -> Result<String, DomainError> {
    let name = name.trim_end_matches('.').to_ascii_lowercase();
    if name.is_empty() || name.split('.').any(str::is_empty) {
        return Err(DomainError::InvalidDomainPattern(entry.to_string()));
    }
    Ok(name)
}

/// A compiled list of domain patterns.
pub struct DomainSet {
    full: FxHashSet<CompactString>,
    suffixes: SuffixTrie,
    keywords: Option<AhoCorasick>,
    regexes: Vec<Regex>,
    len: usize,
}

impl DomainSet {
    /// Parse a whitespace/newline separated pattern list. `#` starts a
    /// comment line. An empty list is rejected.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let mut full = FxHashSet::default();
        let mut suffixes = SuffixTrie::new();
        let mut keywords = Vec::new();
        let mut regexes = Vec::new();
        let mut len = 0;

        for entry in list_entries(text) {
            match DomainPattern::parse(entry)? {
                DomainPattern::Full(name) => {
                    full.insert(CompactString::new(name));
                }
                DomainPattern::Domain(name) => suffixes.insert(&name),
                DomainPattern::Keyword(word) => keywords.push(word),
                DomainPattern::Regexp(pattern) => {
                    let regex = Regex::new(&pattern).map_err(|e| {
                        DomainError::InvalidDomainPattern(format!("regexp:{}: {}", pattern, e))
                    })?;
                    regexes.push(regex);
                }
            }
            len += 1;
        }

        if len == 0 {
            return Err(DomainError::InvalidDomainPattern(
                "pattern list is empty".to_string(),
            ));
        }

        let keywords = if keywords.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::new(&keywords)
                    .map_err(|e| DomainError::InvalidDomainPattern(e.to_string()))?,
            )
        };

        debug!(
            full = full.len(),
            domains = suffixes.len(),
            regexes = regexes.len(),
            "Domain set compiled"
        );

        Ok(Self {
            full,
            suffixes,
            keywords,
            regexes,
            len,
        })
    }

    /// Test a normalized (lowercase, no trailing dot) name.
    ///
    /// Fails only when a regular expression gives up on the input.
    pub fn contains(&self, name: &str) -> Result<bool, DomainError> {
        if self.full.contains(name) || self.suffixes.contains(name) {
            return Ok(true);
        }

        if let Some(keywords) = &self.keywords {
            if keywords.is_match(name) {
                return Ok(true);
            }
        }

        for regex in &self.regexes {
            let matched = regex.is_match(name).map_err(|e| {
                DomainError::InvalidDomainName(format!(
                    "regexp {} on {}: {}",
                    regex.as_str(),
                    name,
                    e
                ))
            })?;
            if matched {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Number of pattern entries, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Matches the question name against a [`DomainSet`].
pub struct QNameMatcher {
    set: Arc<DomainSet>,
}

impl QNameMatcher {
    pub fn new(set: Arc<DomainSet>) -> Self {
        Self { set }
    }
}

#[async_trait]
impl Matcher for QNameMatcher {
    async fn matches(&self, ctx: &QueryContext) -> Result<bool, DomainError> {
        self.set.contains(ctx.qname())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DomainSetBuilder;

impl DomainMatcherBuilder for DomainSetBuilder {
    fn build(&self, args: &str) -> Result<Arc<dyn Matcher>, DomainError> {
        let set = DomainSet::parse(args)?;
        Ok(Arc::new(QNameMatcher::new(Arc::new(set))))
    }
}
