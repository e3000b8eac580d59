//! 4x3 matrix keypad scanner
//!
//! Columns are driven low one at a time; row inputs have pull-ups, so a
//! pressed key reads low on its row while its column is active. `poll`
//! reports rising edges only, one key per call.

use amblyon_core::input::Key;
use amblyon_hal::{InputPin, OutputPin};

/// Keypad rows
pub const ROW_COUNT: usize = 4;
/// Keypad columns
pub const COL_COUNT: usize = 3;

/// Key legend by (row, column) position
const LAYOUT: [[Key; COL_COUNT]; ROW_COUNT] = [
    [Key::E, Key::D, Key::C],
    [Key::H, Key::G, Key::B],
    [Key::N, Key::F, Key::A],
    [Key::K, Key::J, Key::I],
];

/// Matrix keypad scanner with edge detection
pub struct MatrixKeypad<R, C> {
    rows: [R; ROW_COUNT],
    cols: [C; COL_COUNT],
    last: Option<Key>,
}

impl<R: InputPin, C: OutputPin> MatrixKeypad<R, C> {
    pub fn new(rows: [R; ROW_COUNT], mut cols: [C; COL_COUNT]) -> Self {
        // Idle state: all columns released (high)
        for col in cols.iter_mut() {
            col.set_high();
        }
        Self {
            rows,
            cols,
            last: None,
        }
    }

    /// Scan the matrix once and return the pressed key, if any
    ///
    /// When several keys are down the lowest (row, column) wins.
    fn scan(&mut self) -> Option<Key> {
        let mut found = None;
        for (ci, col) in self.cols.iter_mut().enumerate() {
            col.set_low();
            if found.is_none() {
                for (ri, row) in self.rows.iter().enumerate() {
                    if row.is_low() {
                        found = Some(LAYOUT[ri][ci]);
                        break;
                    }
                }
            }
            col.set_high();
        }
        found
    }

    /// Scan and report a newly pressed key
    ///
    /// Returns `Some` only on the transition from released to pressed;
    /// holding a key yields nothing until it is released.
    pub fn poll(&mut self) -> Option<Key> {
        let current = self.scan();
        let event = match (self.last, current) {
            (None, Some(key)) => Some(key),
            _ => None,
        };
        self.last = current;
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    extern crate std;
    use std::rc::Rc;

    /// Output pin recording its own level
    struct TestCol(Rc<Cell<bool>>);

    impl OutputPin for TestCol {
        fn set_high(&mut self) {
            self.0.set(true);
        }
        fn set_low(&mut self) {
            self.0.set(false);
        }
        fn is_set_high(&self) -> bool {
            self.0.get()
        }
    }

    /// Input pin that reads low while its key's column is driven low
    struct TestRow {
        pressed_col: Rc<Cell<Option<usize>>>,
        cols: [Rc<Cell<bool>>; COL_COUNT],
        row_index: usize,
        pressed_row: Rc<Cell<Option<usize>>>,
    }

    impl InputPin for TestRow {
        fn is_high(&self) -> bool {
            match (self.pressed_row.get(), self.pressed_col.get()) {
                (Some(r), Some(c)) if r == self.row_index => self.cols[c].get(),
                _ => true,
            }
        }
    }

    struct Harness {
        keypad: MatrixKeypad<TestRow, TestCol>,
        pressed_row: Rc<Cell<Option<usize>>>,
        pressed_col: Rc<Cell<Option<usize>>>,
    }

    impl Harness {
        fn new() -> Self {
            let col_levels: [Rc<Cell<bool>>; COL_COUNT] =
                core::array::from_fn(|_| Rc::new(Cell::new(true)));
            let pressed_row = Rc::new(Cell::new(None));
            let pressed_col = Rc::new(Cell::new(None));

            let cols = core::array::from_fn(|i| TestCol(col_levels[i].clone()));
            let rows = core::array::from_fn(|i| TestRow {
                pressed_col: pressed_col.clone(),
                cols: core::array::from_fn(|j| col_levels[j].clone()),
                row_index: i,
                pressed_row: pressed_row.clone(),
            });

            Self {
                keypad: MatrixKeypad::new(rows, cols),
                pressed_row,
                pressed_col,
            }
        }

        fn press(&mut self, row: usize, col: usize) {
            self.pressed_row.set(Some(row));
            self.pressed_col.set(Some(col));
        }

        fn release(&mut self) {
            self.pressed_row.set(None);
            self.pressed_col.set(None);
        }
    }

    #[test]
    fn test_idle_matrix_reports_nothing() {
        let mut h = Harness::new();
        assert_eq!(h.keypad.poll(), None);
        assert_eq!(h.keypad.poll(), None);
    }

    #[test]
    fn test_press_maps_position_to_legend() {
        let mut h = Harness::new();
        h.press(0, 2);
        assert_eq!(h.keypad.poll(), Some(Key::C));

        h.release();
        h.keypad.poll();

        h.press(3, 0);
        assert_eq!(h.keypad.poll(), Some(Key::K));
    }

    #[test]
    fn test_held_key_reports_once() {
        let mut h = Harness::new();
        h.press(1, 1);
        assert_eq!(h.keypad.poll(), Some(Key::G));
        assert_eq!(h.keypad.poll(), None);
        assert_eq!(h.keypad.poll(), None);

        h.release();
        assert_eq!(h.keypad.poll(), None);

        h.press(1, 1);
        assert_eq!(h.keypad.poll(), Some(Key::G));
    }

    #[test]
    fn test_columns_released_after_scan() {
        let mut h = Harness::new();
        h.press(2, 1);
        h.keypad.poll();
        for col in &h.keypad.cols {
            assert!(col.is_set_high());
        }
    }
}
