use std::ops::Sub;

use derive_more::{Add, AddAssign};

/// Generic bidirectional energy flow through a grid meter.
#[must_use]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Add, AddAssign)]
pub struct Flow<T> {
    /// Importing from the grid.
    pub import: T,

    /// Exporting to the grid.
    pub export: T,
}

impl<T: Copy + Sub> Flow<T> {
    /// Net flow, positive when importing.
    pub fn net(&self) -> T::Output {
        self.import - self.export
    }
}
