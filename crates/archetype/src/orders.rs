use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Number of leading fold positions that take every combination of members
pub const DEFAULT_COVER: usize = 3;

/// Permutation of `[0, n)`: the order in which cluster members are folded
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoldOrder(Vec<usize>);

impl FoldOrder {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Identity permutation of `[0, n)`
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every index in `[0, n)` appears exactly once
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.0.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        self.0
            .iter()
            .all(|&i| i < n && !std::mem::replace(&mut seen[i], true))
    }

    /// Reorder `items` by this permutation.
    ///
    /// Panics on an index outside `items`; check [`Self::is_permutation_of`] first
    /// for orders from an untrusted strategy.
    pub fn permute<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.0.iter().map(|&i| items[i].clone()).collect()
    }
}

/// Source of candidate fold orders for a cluster of `n` members.
///
/// Orders that are not permutations of `[0, n)` are skipped by the search.
pub trait OrderStrategy: Send + Sync {
    fn orders(&self, n: usize) -> Box<dyn Iterator<Item = FoldOrder> + '_>;

    /// Stable description of the strategy; part of the cluster cache key.
    ///
    /// Must cover every setting that changes the orders produced: two values of the
    /// same type with equal fingerprints share cached archetypes.
    fn fingerprint(&self) -> String;
}

/// Fold orders whose first positions change the most often.
///
/// Every `cover`-subset of members appears as the leading prefix exactly once, so the
/// members that dominate an archetype's visible start are tried in every relative
/// position while the total stays at `C(n, cover)` instead of `n!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstVolatileOrders {
    cover: usize,
}

impl FirstVolatileOrders {
    pub fn new(cover: usize) -> Self {
        Self { cover }
    }

    pub fn cover(&self) -> usize {
        self.cover
    }
}

impl Default for FirstVolatileOrders {
    fn default() -> Self {
        Self::new(DEFAULT_COVER)
    }
}

impl OrderStrategy for FirstVolatileOrders {
    fn orders(&self, n: usize) -> Box<dyn Iterator<Item = FoldOrder> + '_> {
        Box::new(enumerate_orders(n, self.cover))
    }

    fn fingerprint(&self) -> String {
        format!("first-volatile:{}", self.cover)
    }
}

/// Lazily enumerate fold orders of `[0, n)`.
///
/// Combinations of `cover` elements are drawn from `[n - 1, ..., 0]` in
/// lexicographic position order; each is reversed to form the prefix, and the
/// indices not chosen follow in ascending order.
pub fn enumerate_orders(n: usize, cover: usize) -> impl Iterator<Item = FoldOrder> {
    let cover = cover.min(n);
    (0..n).rev().combinations(cover).map(move |chosen| {
        let mut taken = vec![false; n];
        let mut order: Vec<usize> = Vec::with_capacity(n);
        for &i in chosen.iter().rev() {
            taken[i] = true;
            order.push(i);
        }
        order.extend((0..n).filter(|&i| !taken[i]));
        FoldOrder(order)
    })
}

/// `C(n, min(cover, n))`, saturating at `usize::MAX`
pub fn order_count(n: usize, cover: usize) -> usize {
    let k = cover.min(n).min(n - cover.min(n));
    let mut count: u128 = 1;
    for i in 0..k {
        count = count * (n - i) as u128 / (i + 1) as u128;
        if count > usize::MAX as u128 {
            return usize::MAX;
        }
    }
    count as usize
}
