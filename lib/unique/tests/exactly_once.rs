//! Arbitrary operation sequences never release an instance twice and never
//! leak one.

use std::{cell::RefCell, collections::HashSet, mem, rc::Rc};

use proptest::prelude::*;
use unique::Unique;

const SLOTS: usize = 3;

struct Tracked {
    id: u32,
    released: Rc<RefCell<Vec<u32>>>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.released.borrow_mut().push(self.id);
    }
}

#[derive(Debug, Clone)]
enum Op {
    Make(usize),
    ResetWith(usize),
    Reset(usize),
    Take { from: usize, to: usize },
    Assign { from: usize, to: usize },
    Release(usize),
    Drop(usize),
}

fn op() -> impl Strategy<Value = Op> {
    let slot = || 0..SLOTS;
    prop_oneof![
        slot().prop_map(Op::Make),
        slot().prop_map(Op::ResetWith),
        slot().prop_map(Op::Reset),
        (slot(), slot()).prop_map(|(from, to)| Op::Take { from, to }),
        (slot(), slot()).prop_map(|(from, to)| Op::Assign { from, to }),
        slot().prop_map(Op::Release),
        slot().prop_map(Op::Drop),
    ]
}

proptest! {
    #[test]
    fn every_instance_released_exactly_once(ops in prop::collection::vec(op(), 0..64)) {
        let released = Rc::new(RefCell::new(Vec::new()));
        let mut next_id = 0u32;
        let mut make = || {
            next_id += 1;
            Tracked { id: next_id, released: released.clone() }
        };
        let mut handles: [Unique<Tracked>; SLOTS] = Default::default();

        for op in ops {
            match op {
                Op::Make(slot) => handles[slot] = Unique::from_value(make()),
                Op::ResetWith(slot) => handles[slot].reset_box(Box::new(make())),
                Op::Reset(slot) => handles[slot].reset(),
                Op::Take { from, to } => {
                    let moved = handles[from].take();
                    handles[to] = moved;
                }
                Op::Assign { from, to } => {
                    let mut source = mem::take(&mut handles[from]);
                    if from == to {
                        handles[to] = source;
                    } else {
                        handles[to].assign(&mut source);
                        prop_assert!(!source.is_present());
                        handles[from] = source;
                    }
                }
                Op::Release(slot) => {
                    if let Some(raw) = handles[slot].release() {
                        drop(unsafe { Box::from_raw(raw.as_ptr()) });
                    }
                    prop_assert!(!handles[slot].is_present());
                }
                Op::Drop(slot) => drop(mem::take(&mut handles[slot])),
            }

            let ledger: HashSet<u32> = released.borrow().iter().copied().collect();
            prop_assert_eq!(ledger.len(), released.borrow().len(), "double release");
            let live: Vec<u32> = handles.iter().filter_map(|h| h.as_ref().map(|t| t.id)).collect();
            let distinct: HashSet<u32> = live.iter().copied().collect();
            prop_assert_eq!(distinct.len(), live.len(), "instance owned twice");
            prop_assert!(live.iter().all(|id| !ledger.contains(id)), "live instance released");
        }

        drop(handles);
        let mut all = released.borrow().clone();
        all.sort_unstable();
        prop_assert_eq!(all, (1..=next_id).collect::<Vec<_>>());
    }
}
