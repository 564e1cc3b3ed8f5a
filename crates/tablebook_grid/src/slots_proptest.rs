#[cfg(test)]
mod tests {
    use crate::slots::{TimeSlotSequence, SLOT_MINUTES};
    use proptest::prelude::*;

    // end_hour is drawn relative to start_hour so every generated schedule is valid
    fn schedule() -> impl Strategy<Value = TimeSlotSequence> {
        (0..24u32, 0..24u32).prop_map(|(start, end)| {
            TimeSlotSequence::new(start, end % (start + 1)).expect("generated schedule is valid")
        })
    }

    proptest! {
        #[test]
        fn test_label_index_round_trip(slots in schedule(), raw_index in 0..48usize) {
            let index = raw_index % slots.slot_count();
            let label = slots.slot_label(index).unwrap();
            prop_assert_eq!(slots.slot_index(&label).unwrap(), index);
        }

        #[test]
        fn test_slot_count_formula(slots in schedule()) {
            let expected = ((24 - slots.start_hour() + slots.end_hour()) * 2) as usize;
            prop_assert_eq!(slots.slot_count(), expected);
            prop_assert_eq!(
                slots.schedule_end_minutes() - slots.schedule_start_minutes(),
                expected as u32 * SLOT_MINUTES
            );
        }

        #[test]
        fn test_labels_are_unique(slots in schedule()) {
            let mut labels: Vec<String> = slots.labels().collect();
            let count = labels.len();
            labels.sort();
            labels.dedup();
            prop_assert_eq!(labels.len(), count);
            prop_assert_eq!(count, slots.slot_count());
        }

        #[test]
        fn test_indices_past_the_end_are_rejected(slots in schedule(), extra in 0..10usize) {
            prop_assert!(slots.slot_label(slots.slot_count() + extra).is_err());
        }
    }
}
