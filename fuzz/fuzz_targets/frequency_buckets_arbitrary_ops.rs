#![no_main]

use boundcache::ds::{FrequencyBuckets, FrequencyNode, Linked, Links, SlotArena, SlotId};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Default)]
struct Node {
    links: Links,
    freq: u64,
    rank: u64,
}

impl Linked for Node {
    fn links(&self) -> &Links {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}

impl FrequencyNode for Node {
    fn freq(&self) -> u64 {
        self.freq
    }

    fn set_freq(&mut self, freq: u64) {
        self.freq = freq;
    }

    fn rank(&self) -> u64 {
        self.rank
    }
}

// Fuzz arbitrary insert/touch/remove sequences on FrequencyBuckets
//
// After every step the minimum tracked by the buckets must match a scan of
// the member frequencies, the ascending walk must be sorted, and the victim
// must be the earliest insert at the minimum frequency.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<Node> = SlotArena::new();
    let mut buckets = FrequencyBuckets::new();
    let mut members: Vec<SlotId> = Vec::new();
    let mut next_rank = 0u64;

    for pair in data.chunks_exact(2) {
        let (op, arg) = (pair[0] % 4, usize::from(pair[1]));
        match op {
            0 => {
                let id = arena.insert(Node {
                    rank: next_rank,
                    ..Node::default()
                });
                next_rank += 1;
                assert!(buckets.insert(&mut arena, id));
                members.push(id);
                assert_eq!(buckets.min_freq(), Some(1));
            }
            1 | 2 => {
                if !members.is_empty() {
                    let id = members[arg % members.len()];
                    let before = arena.get(id).unwrap().freq;
                    assert_eq!(buckets.touch(&mut arena, id), Some(before + 1));
                }
            }
            _ => {
                if !members.is_empty() {
                    let id = members.swap_remove(arg % members.len());
                    assert!(buckets.remove(&mut arena, id).is_some());
                    arena.remove(id);
                }
            }
        }

        assert_eq!(buckets.len(), members.len());
        let expected_min = members.iter().map(|id| arena.get(*id).unwrap().freq).min();
        assert_eq!(buckets.min_freq(), expected_min);

        let freqs: Vec<u64> = buckets
            .iter()
            .map(|id| arena.get(id).unwrap().freq)
            .collect();
        assert_eq!(freqs.len(), members.len());
        assert!(freqs.windows(2).all(|w| w[0] <= w[1]));
        let expected_victim = members
            .iter()
            .copied()
            .min_by_key(|id| {
                let node = arena.get(*id).unwrap();
                (node.freq, node.rank)
            });
        assert_eq!(buckets.peek_min(), expected_victim);
    }
});
