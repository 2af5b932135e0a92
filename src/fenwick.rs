/// Binary indexed tree over label values, used as an order-statistics
/// structure when counting inversions: `add` marks a label as seen and
/// `sum_le` reports how many seen labels are `<=` a given value.
#[derive(Debug, Clone)]
pub struct FenwickTree {
    tree: Vec<u32>,
}

impl FenwickTree {
    #[inline]
    pub fn new(len: usize) -> Self {
        Self {
            tree: vec![0; len + 1],
        }
    }

    #[inline]
    pub fn add(&mut self, index: usize, delta: u32) {
        let mut i = index + 1;
        while i < self.tree.len() {
            self.tree[i] += delta;
            i += i & i.wrapping_neg();
        }
    }

    /// Inclusive prefix sum over `0..=index`.
    #[inline]
    pub fn sum_le(&self, index: usize) -> u32 {
        let mut i = index + 1;
        let mut sum = 0;
        while i > 0 {
            sum += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        sum
    }
}
