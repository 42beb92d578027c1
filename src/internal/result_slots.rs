use std::sync::Mutex;

/// Pre-sized result storage. Slot `i` belongs to item `i` and is written
/// once by whichever worker took that item, so no two workers ever lock the
/// same slot.
pub struct ResultSlots<T> {
    slots: Vec<Mutex<Option<T>>>,
}

impl<T> ResultSlots<T> {
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| Mutex::new(None)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Store the outcome of item `index`. A second write to the same slot is ignored.
    pub fn insert(&self, index: usize, item: T) {
        let mut slot = self.slots[index].lock().unwrap();
        if slot.is_some() {
            log::warn!("result slot {index} written twice, keeping the first value");
            return;
        }
        *slot = Some(item);
    }

    pub fn filled(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.lock().unwrap().is_some())
            .count()
    }

    /// Consume the slots in index order.
    ///
    /// Must only be called once every slot has been written, i.e. after all
    /// workers have been joined.
    pub fn into_vec(self) -> Vec<T> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| match slot.into_inner().unwrap() {
                Some(item) => item,
                None => unreachable!("result slot {index} was never written"),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_slots_in_order() {
        let slots = ResultSlots::new(3);
        slots.insert(0, 1);
        slots.insert(1, 2);
        slots.insert(2, 3);

        assert_eq!(slots.into_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_result_slots_out_of_order() {
        let slots = ResultSlots::new(5);
        slots.insert(4, 5);
        slots.insert(2, 3);
        assert_eq!(slots.filled(), 2);
        slots.insert(0, 1);
        slots.insert(3, 4);
        slots.insert(1, 2);
        assert_eq!(slots.filled(), 5);

        assert_eq!(slots.into_vec(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_result_slots_first_write_wins() {
        let slots = ResultSlots::new(1);
        slots.insert(0, "first");
        slots.insert(0, "second");
        assert_eq!(slots.into_vec(), vec!["first"]);
    }

    #[test]
    fn test_result_slots_shared_across_threads() {
        let slots = ResultSlots::new(64);
        std::thread::scope(|s| {
            for offset in 0..4 {
                let slots = &slots;
                s.spawn(move || {
                    for index in (offset..64).step_by(4) {
                        slots.insert(index, index * 10);
                    }
                });
            }
        });
        assert_eq!(slots.len(), 64);
        assert_eq!(slots.into_vec(), (0..64).map(|i| i * 10).collect::<Vec<_>>());
    }
}
