//! Union-find with path compression and union by rank.

/// Disjoint sets over slots `0..=n`.
///
/// Slot 0 is left free for a virtual root so callers with 1-based ids can
/// index directly.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl DisjointSet {
    /// Create `n + 1` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..=n).collect(),
            rank: vec![0; n + 1],
        }
    }

    /// Number of slots, including slot 0.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of `x`'s set. Every node on the walk is re-pointed at
    /// the root.
    ///
    /// # Panics
    /// If `x` is outside the initialized range.
    pub fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    /// Merge the sets of `x` and `y`. Returns `false` if they were already
    /// joined.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);

        if rx == ry {
            return false;
        }

        if self.rank[rx] < self.rank[ry] {
            self.parent[rx] = ry;
        } else if self.rank[rx] > self.rank[ry] {
            self.parent[ry] = rx;
        } else {
            self.parent[ry] = rx;
            self.rank[rx] += 1;
        }

        true
    }

    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }
}
