mod domain_set;
mod ip_list;
mod suffix_trie;

pub use domain_set::{DomainPattern, DomainSet, DomainSetBuilder, QNameMatcher};
pub use ip_list::{IpList, IpListBuilder, ResponseIpMatcher};
pub use suffix_trie::SuffixTrie;

/// Non-comment tokens of a multi-line pattern list.
pub(crate) fn list_entries(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(str::split_whitespace)
}
