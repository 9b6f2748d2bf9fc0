use crate::cache::{ClusterEntry, ClusterKey, MemoCache};
use crate::config::ArchetypeConfig;
use crate::error::Result;
use crate::orders::{FirstVolatileOrders, FoldOrder, OrderStrategy};
use crate::types::{Cluster, TokenSequence};
use serde::Serialize;
use std::any::type_name;
use std::sync::Arc;

/// Ranks candidate archetypes; higher is more representative
pub trait Scorer: Send + Sync {
    fn score(&self, candidate: &TokenSequence) -> usize;

    /// Stable name; part of the cluster cache key together with the type name.
    ///
    /// A scorer type whose values rank differently must give each a distinct name,
    /// otherwise searches sharing a [`MemoCache`] hand each other's archetypes back.
    fn name(&self) -> &'static str;
}

/// Character length of the candidate joined with single spaces
#[derive(Debug, Clone, Copy, Default)]
pub struct JoinedLengthScorer;

impl Scorer for JoinedLengthScorer {
    fn score(&self, candidate: &TokenSequence) -> usize {
        candidate.joined_char_len()
    }

    fn name(&self) -> &'static str {
        "joined-length"
    }
}

/// Archetype plus the bookkeeping of the search that produced it
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub archetype: TokenSequence,
    pub score: usize,
    /// Members as given, duplicates included
    pub members: usize,
    pub distinct_members: usize,
    pub orders_tried: usize,
    /// The order ceiling stopped the search before the strategy ran out of orders
    pub truncated: bool,
    /// Order that produced the archetype, as indices into the canonical members
    pub best_order: Option<FoldOrder>,
    pub from_cache: bool,
}

/// Bounded search over fold orders for the best archetype of a cluster.
///
/// Each candidate order folds the canonical members left to right with the memoized
/// pairwise matcher. A candidate replaces the current best only when it scores
/// strictly higher, so ties go to the order enumerated first.
pub struct ArchetypeSearch {
    strategy: Box<dyn OrderStrategy>,
    scorer: Box<dyn Scorer>,
    max_orders: Option<usize>,
    cache: Arc<MemoCache>,
    fingerprint: Arc<str>,
}

impl ArchetypeSearch {
    /// Search with a cache of its own, sized by `config.cache`
    pub fn new(config: &ArchetypeConfig) -> Result<Self> {
        config.validate()?;
        Self::with_cache(config, Arc::new(MemoCache::new(&config.cache)))
    }

    /// Search sharing an existing cache (e.g. one cache per batch run)
    pub fn with_cache(config: &ArchetypeConfig, cache: Arc<MemoCache>) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_strategy(
            FirstVolatileOrders::new(config.cover),
            JoinedLengthScorer,
            config.max_orders,
            cache,
        ))
    }

    /// Search with a custom strategy and scorer.
    ///
    /// Cluster results are cached under the type names of both, their
    /// [`OrderStrategy::fingerprint`] and [`Scorer::name`], and the order ceiling.
    pub fn with_strategy<O, S>(
        strategy: O,
        scorer: S,
        max_orders: Option<usize>,
        cache: Arc<MemoCache>,
    ) -> Self
    where
        O: OrderStrategy + 'static,
        S: Scorer + 'static,
    {
        let max_part = max_orders.map_or_else(|| "all".to_string(), |m| m.to_string());
        let fingerprint: Arc<str> = Arc::from(format!(
            "{}={}|{}={}|max_orders={max_part}",
            type_name::<O>(),
            strategy.fingerprint(),
            type_name::<S>(),
            scorer.name()
        ));
        Self {
            strategy: Box::new(strategy),
            scorer: Box::new(scorer),
            max_orders,
            cache,
            fingerprint,
        }
    }

    pub fn cache(&self) -> &Arc<MemoCache> {
        &self.cache
    }

    /// Archetype of a cluster; an empty cluster yields the empty sequence
    pub fn extract_archetype<I>(&self, cluster: I) -> TokenSequence
    where
        I: IntoIterator<Item = TokenSequence>,
    {
        self.extract_with_stats(cluster).archetype
    }

    /// Tokenize raw comment texts and extract their archetype
    pub fn extract_from_texts<S: AsRef<str>>(&self, texts: &[S]) -> SearchOutcome {
        self.extract_with_stats(texts.iter().map(|t| TokenSequence::from_text(t.as_ref())))
    }

    pub fn extract_with_stats<I>(&self, cluster: I) -> SearchOutcome
    where
        I: IntoIterator<Item = TokenSequence>,
    {
        let raw: Vec<TokenSequence> = cluster.into_iter().collect();
        let members = raw.len();
        let cluster = Cluster::new(raw);
        let distinct_members = cluster.len();

        if cluster.is_empty() {
            return SearchOutcome {
                archetype: TokenSequence::empty(),
                score: 0,
                members,
                distinct_members,
                orders_tried: 0,
                truncated: false,
                best_order: None,
                from_cache: false,
            };
        }

        let key = ClusterKey {
            fingerprint: Arc::clone(&self.fingerprint),
            members: cluster.into_members(),
        };
        if let Some(entry) = self.cache.cluster(&key) {
            log::trace!("cluster of {distinct_members} served from cache");
            return outcome(entry, members, distinct_members, true);
        }

        let entry = self.search(&key.members);
        log::debug!(
            "cluster of {} distinct members: {} orders, best score {}",
            distinct_members,
            entry.orders_tried,
            entry.score
        );
        let entry = self.cache.store_cluster(key, entry);
        outcome(entry, members, distinct_members, false)
    }

    fn search(&self, strings: &[TokenSequence]) -> ClusterEntry {
        let n = strings.len();
        let limit = self.max_orders.unwrap_or(usize::MAX);
        let mut best = TokenSequence::empty();
        let mut best_score = 0;
        let mut best_order = None;
        let mut orders_tried = 0;

        let mut orders = self.strategy.orders(n).filter(|order| {
            let valid = order.is_permutation_of(n);
            if !valid {
                log::warn!("Skipping fold order {:?}: not a permutation of 0..{n}", order.as_slice());
            }
            valid
        });
        for order in orders.by_ref().take(limit) {
            orders_tried += 1;
            let permuted = order.permute(strings);
            let candidate = self.cache.fold(&permuted);
            let score = self.scorer.score(&candidate);
            if score > best_score {
                best = candidate;
                best_score = score;
                best_order = Some(order);
            }
        }

        let truncated = orders_tried == limit && orders.next().is_some();
        if truncated {
            log::warn!(
                "Cluster of {n} members: fold orders capped at {limit}; raise max_orders for a wider search"
            );
        }

        ClusterEntry {
            archetype: best,
            score: best_score,
            orders_tried,
            truncated,
            best_order,
        }
    }
}

fn outcome(
    entry: ClusterEntry,
    members: usize,
    distinct_members: usize,
    from_cache: bool,
) -> SearchOutcome {
    SearchOutcome {
        archetype: entry.archetype,
        score: entry.score,
        members,
        distinct_members,
        orders_tried: entry.orders_tried,
        truncated: entry.truncated,
        best_order: entry.best_order,
        from_cache,
    }
}

/// Archetype of `cluster` with the default strategy and a cache scoped to this call.
///
/// Every fold order is tried. Use [`ArchetypeSearch`] with a `max_orders` ceiling when
/// clusters can be large.
pub fn extract_archetype<I>(cluster: I) -> TokenSequence
where
    I: IntoIterator<Item = TokenSequence>,
{
    ArchetypeSearch::with_strategy(
        FirstVolatileOrders::default(),
        JoinedLengthScorer,
        None,
        Arc::new(MemoCache::unbounded()),
    )
    .extract_archetype(cluster)
}
