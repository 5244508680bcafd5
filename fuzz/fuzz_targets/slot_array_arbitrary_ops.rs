#![no_main]

use libfuzzer_sys::fuzz_target;
use uarray::ds::SlotArray;

// Fuzz arbitrary operation sequences on SlotArray
//
// Tests random sequences of add, edit, delete, take, get, clear operations
// against a naive first-fit model.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let capacity = usize::from(data[0] % 32);
    let mut array: SlotArray<u32> = SlotArray::new(capacity);
    let mut model: Vec<Option<u32>> = vec![None; capacity];

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 7;
        let value = u32::from(data[idx + 1]);
        // Indices may run one past the end to exercise the out-of-range path.
        let index = (value as usize) % (capacity + 1);

        match op {
            0 => {
                // add
                let expected = model.iter().position(Option::is_none);
                match array.add(value) {
                    Ok(got) => {
                        assert_eq!(Some(got), expected);
                        model[got] = Some(value);
                    }
                    Err(rejected) => {
                        assert_eq!(expected, None);
                        assert_eq!(rejected.into_item(), value);
                    }
                }
            }
            1 => {
                // edit
                let occupied = model.get(index).is_some_and(Option::is_some);
                let result = array.edit(index, value);
                assert_eq!(result.is_ok(), occupied);
                if occupied {
                    model[index] = Some(value);
                }
            }
            2 => {
                // delete
                let expected = model
                    .get_mut(index)
                    .map_or(0, |slot| usize::from(slot.take().is_some()));
                assert_eq!(array.delete(index), expected);
            }
            3 => {
                // take
                let expected = model.get_mut(index).and_then(Option::take);
                assert_eq!(array.take(index), expected);
            }
            4 => {
                // get (read-only)
                assert_eq!(array.get(index), model.get(index).and_then(Option::as_ref));
            }
            5 => {
                // used_indices (read-only)
                let expected: Vec<usize> = model
                    .iter()
                    .enumerate()
                    .filter_map(|(i, slot)| slot.map(|_| i))
                    .collect();
                assert_eq!(array.used_indices(), expected);
            }
            6 => {
                // clear
                let expected = model.iter_mut().filter_map(Option::take).count();
                assert_eq!(array.clear(), expected);
                assert!(array.is_empty());
            }
            _ => unreachable!(),
        }

        array.debug_validate_invariants();
        assert_eq!(array.len(), model.iter().filter(|s| s.is_some()).count());

        idx += 2;
    }
});
