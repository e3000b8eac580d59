//! Editable settings fields
//!
//! The menu cursor selects one of five fields; increment/decrement applies
//! the field's step. Bounds are checked before a value is accepted, so no
//! transient out-of-range value is ever observable.

use super::settings::Settings;

/// Number of menu-editable fields
pub const FIELD_COUNT: u8 = 5;

/// A menu-editable settings field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// Lamp toggle interval (step 0.1s)
    #[default]
    Interval,
    /// Lamp brightness (step 1%, max 100)
    Brightness,
    /// Repetition count (step 1)
    Quantity,
    /// Session duration (step 1s)
    Time,
    /// Projector pulse length (step 0.1s)
    Length,
}

/// Direction of a field edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdjustDir {
    Up,
    Down,
}

impl Field {
    /// Cursor position of this field, 0..FIELD_COUNT
    pub fn index(self) -> u8 {
        match self {
            Field::Interval => 0,
            Field::Brightness => 1,
            Field::Quantity => 2,
            Field::Time => 3,
            Field::Length => 4,
        }
    }

    /// Next field, wrapping back to the first
    pub fn next(self) -> Self {
        match self {
            Field::Interval => Field::Brightness,
            Field::Brightness => Field::Quantity,
            Field::Quantity => Field::Time,
            Field::Time => Field::Length,
            Field::Length => Field::Interval,
        }
    }

    /// Previous field, wrapping to the last
    pub fn prev(self) -> Self {
        match self {
            Field::Interval => Field::Length,
            Field::Brightness => Field::Interval,
            Field::Quantity => Field::Brightness,
            Field::Time => Field::Quantity,
            Field::Length => Field::Time,
        }
    }
}

impl Settings {
    /// Apply one step to a field, clamped to its range
    ///
    /// Lower bound is zero everywhere; brightness also caps at 100.
    /// Unbounded integer fields saturate at their type limit.
    pub fn adjust(&mut self, field: Field, dir: AdjustDir) {
        match (field, dir) {
            (Field::Interval, AdjustDir::Up) => {
                self.interval_ds = self.interval_ds.saturating_add(1)
            }
            (Field::Interval, AdjustDir::Down) => {
                self.interval_ds = self.interval_ds.saturating_sub(1)
            }
            (Field::Brightness, AdjustDir::Up) => {
                if self.brightness < 100 {
                    self.brightness += 1;
                }
            }
            (Field::Brightness, AdjustDir::Down) => {
                self.brightness = self.brightness.saturating_sub(1)
            }
            (Field::Quantity, AdjustDir::Up) => self.quantity = self.quantity.saturating_add(1),
            (Field::Quantity, AdjustDir::Down) => self.quantity = self.quantity.saturating_sub(1),
            (Field::Time, AdjustDir::Up) => self.time_s = self.time_s.saturating_add(1),
            (Field::Time, AdjustDir::Down) => self.time_s = self.time_s.saturating_sub(1),
            (Field::Length, AdjustDir::Up) => self.length_ds = self.length_ds.saturating_add(1),
            (Field::Length, AdjustDir::Down) => self.length_ds = self.length_ds.saturating_sub(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cursor_wraps_forward() {
        let mut f = Field::Interval;
        for _ in 0..FIELD_COUNT {
            f = f.next();
        }
        assert_eq!(f, Field::Interval);
    }

    #[test]
    fn test_cursor_wraps_backward() {
        assert_eq!(Field::Interval.prev(), Field::Length);
        assert_eq!(Field::Length.next(), Field::Interval);
    }

    #[test]
    fn test_brightness_clamps_at_bounds() {
        let mut s = Settings {
            brightness: 100,
            ..Default::default()
        };
        s.adjust(Field::Brightness, AdjustDir::Up);
        assert_eq!(s.brightness, 100);

        s.brightness = 0;
        s.adjust(Field::Brightness, AdjustDir::Down);
        assert_eq!(s.brightness, 0);
    }

    #[test]
    fn test_lower_bounds_are_zero() {
        let mut s = Settings {
            interval_ds: 0,
            quantity: 0,
            time_s: 0,
            length_ds: 0,
            ..Default::default()
        };
        for field in [Field::Interval, Field::Quantity, Field::Time, Field::Length] {
            s.adjust(field, AdjustDir::Down);
        }
        assert_eq!(s.interval_ds, 0);
        assert_eq!(s.quantity, 0);
        assert_eq!(s.time_s, 0);
        assert_eq!(s.length_ds, 0);
    }

    #[test]
    fn test_steps_apply() {
        let mut s = Settings::default();
        s.adjust(Field::Interval, AdjustDir::Up);
        assert_eq!(s.interval_ds, 3); // 0.2s -> 0.3s
        s.adjust(Field::Time, AdjustDir::Down);
        assert_eq!(s.time_s, 9);
    }

    proptest! {
        /// Ranges hold under arbitrary edit sequences
        #[test]
        fn prop_edits_stay_in_range(ops in proptest::collection::vec((0u8..5, proptest::bool::ANY), 0..200)) {
            let mut s = Settings::default();
            for (idx, up) in ops {
                let field = match idx {
                    0 => Field::Interval,
                    1 => Field::Brightness,
                    2 => Field::Quantity,
                    3 => Field::Time,
                    _ => Field::Length,
                };
                let dir = if up { AdjustDir::Up } else { AdjustDir::Down };
                s.adjust(field, dir);
                prop_assert!(s.brightness <= 100);
            }
        }
    }
}
