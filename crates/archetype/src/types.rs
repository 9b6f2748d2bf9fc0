use crate::error::{ArchetypeError, Result};
use crate::tokenize::words;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A single whitespace-delimited word
pub type Token = String;

/// Immutable, ordered list of tokens.
///
/// Clones share one allocation, so a memo cache hit hands back the very same
/// sequence that was stored. Ordering is lexicographic on tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct TokenSequence(Arc<[Token]>);

impl TokenSequence {
    /// Empty sequence
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Tokenize text into a sequence
    pub fn from_text(text: &str) -> Self {
        Self::from_valid(words(text).into_iter().map(str::to_string).collect())
    }

    /// Build a sequence from caller-supplied tokens.
    ///
    /// Tokens must be non-empty and free of whitespace, otherwise two sequences that
    /// render identically could compare unequal in the cache.
    pub fn try_from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<Token> = tokens.into_iter().map(Into::into).collect();
        for (position, token) in tokens.iter().enumerate() {
            if token.is_empty() {
                return Err(ArchetypeError::InvalidToken {
                    position,
                    reason: "token is empty",
                });
            }
            if token.chars().any(char::is_whitespace) {
                return Err(ArchetypeError::InvalidToken {
                    position,
                    reason: "token contains whitespace",
                });
            }
        }
        Ok(Self::from_valid(tokens))
    }

    pub(crate) fn from_valid(tokens: Vec<Token>) -> Self {
        Self(Arc::from(tokens))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    /// Tokens joined with single spaces
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }

    /// Character count of [`Self::joined`], computed without allocating
    pub fn joined_char_len(&self) -> usize {
        let chars: usize = self.0.iter().map(|t| t.chars().count()).sum();
        chars + self.0.len().saturating_sub(1)
    }

    /// True when both values share one allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for TokenSequence {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for TokenSequence {
    type Target = [Token];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl TryFrom<Vec<String>> for TokenSequence {
    type Error = ArchetypeError;

    fn try_from(tokens: Vec<String>) -> Result<Self> {
        Self::try_from_tokens(tokens)
    }
}

impl From<TokenSequence> for Vec<String> {
    fn from(seq: TokenSequence) -> Self {
        seq.0.to_vec()
    }
}

/// Canonical, duplicate-free set of sequences forming one connected component.
///
/// Members are sorted and deduplicated on construction so that the same set of
/// comments always yields the same member order, whatever order (or multiplicity)
/// they arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Cluster {
    members: Vec<TokenSequence>,
}

impl Cluster {
    pub fn new<I>(members: I) -> Self
    where
        I: IntoIterator<Item = TokenSequence>,
    {
        let mut members: Vec<TokenSequence> = members.into_iter().collect();
        members.sort_unstable();
        members.dedup();
        Self { members }
    }

    pub fn members(&self) -> &[TokenSequence] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn into_members(self) -> Vec<TokenSequence> {
        self.members
    }
}

impl FromIterator<TokenSequence> for Cluster {
    fn from_iter<I: IntoIterator<Item = TokenSequence>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_text_tokenizes_on_whitespace() {
        let seq = TokenSequence::from_text("  Returns\tthe value ");
        assert_eq!(seq.tokens(), ["Returns", "the", "value"]);
        assert_eq!(seq.joined(), "Returns the value");
    }

    #[test]
    fn joined_char_len_counts_characters_not_bytes() {
        let seq = TokenSequence::from_text("größe über");
        assert_eq!(seq.joined_char_len(), "größe über".chars().count());
        assert_eq!(TokenSequence::empty().joined_char_len(), 0);
        assert_eq!(TokenSequence::from_text("a").joined_char_len(), 1);
    }

    #[test]
    fn rejects_empty_and_whitespace_tokens() {
        assert_eq!(
            TokenSequence::try_from_tokens(["ok", ""]),
            Err(ArchetypeError::InvalidToken {
                position: 1,
                reason: "token is empty"
            })
        );
        assert!(matches!(
            TokenSequence::try_from_tokens(["two words"]),
            Err(ArchetypeError::InvalidToken { position: 0, .. })
        ));
        assert!(TokenSequence::try_from_tokens(["a", "b"]).is_ok());
    }

    #[test]
    fn deserialization_validates_tokens() {
        let ok: TokenSequence = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(ok.joined(), "a b");
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"["a","b"]"#);

        let bad = serde_json::from_str::<TokenSequence>(r#"["a b"]"#);
        assert!(bad.is_err());
    }

    #[test]
    fn cluster_sorts_and_dedups() {
        let a = TokenSequence::from_text("b c");
        let b = TokenSequence::from_text("a c");
        let cluster = Cluster::new(vec![a.clone(), b.clone(), a.clone()]);
        assert_eq!(cluster.members(), &[b, a]);
        assert_eq!(cluster.len(), 2);
    }

    #[test]
    fn cluster_is_order_independent() {
        let x = TokenSequence::from_text("x y");
        let y = TokenSequence::from_text("y");
        let first: Cluster = vec![x.clone(), y.clone()].into_iter().collect();
        let second: Cluster = vec![y, x].into_iter().collect();
        assert_eq!(first, second);
    }
}
