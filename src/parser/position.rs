use crate::source::Vector;
use fnv::FnvHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Moved,
    Stood,
}

/// Last observed position per player key.
#[derive(Debug, Default)]
pub struct PositionTracker {
    positions: FnvHashMap<String, Vector>,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `position` for `key` and reports whether it differs from the
    /// previous observation. A key seen for the first time has moved.
    pub fn observe(&mut self, key: &str, position: Vector) -> Movement {
        match self.positions.get_mut(key) {
            Some(previous) => {
                let movement = if *previous == position {
                    Movement::Stood
                } else {
                    Movement::Moved
                };
                *previous = position;
                movement
            }
            None => {
                self.positions.insert(key.to_owned(), position);
                Movement::Moved
            }
        }
    }
}
