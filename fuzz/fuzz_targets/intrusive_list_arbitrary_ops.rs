#![no_main]

use std::collections::VecDeque;

use boundcache::ds::{IntrusiveList, Linked, Links, SlotArena, SlotId};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Default)]
struct Node {
    links: Links,
}

impl Linked for Node {
    fn links(&self) -> &Links {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}

// Fuzz arbitrary push_back / move_to_back / unlink sequences on IntrusiveList
//
// A VecDeque of ids mirrors the expected front-to-back order.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<Node> = SlotArena::new();
    let mut list = IntrusiveList::new();
    let mut model: VecDeque<SlotId> = VecDeque::new();

    for pair in data.chunks_exact(2) {
        let (op, arg) = (pair[0] % 4, usize::from(pair[1]));
        match op {
            0 => {
                let id = arena.insert(Node::default());
                assert!(list.push_back(&mut arena, id));
                model.push_back(id);
            }
            1 => {
                if !model.is_empty() {
                    let pos = arg % model.len();
                    let id = model.remove(pos).unwrap();
                    assert!(list.move_to_back(&mut arena, id));
                    model.push_back(id);
                }
            }
            2 => {
                if !model.is_empty() {
                    let pos = arg % model.len();
                    let id = model.remove(pos).unwrap();
                    assert!(list.unlink(&mut arena, id));
                    arena.remove(id);
                }
            }
            _ => {
                let walked: Vec<SlotId> = list.iter(&arena).collect();
                assert!(walked.iter().eq(model.iter()));
            }
        }

        assert_eq!(list.len(), model.len());
        assert_eq!(list.front(), model.front().copied());
        assert_eq!(list.back(), model.back().copied());
    }
});
