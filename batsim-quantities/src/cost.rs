use std::fmt::{Debug, Display, Formatter};

use crate::Quantity;

pub type Cost = Quantity<0, 0, 1>;

impl Cost {
    /// Value in cents, which is how the running totals are normally displayed.
    #[must_use]
    pub const fn to_cents(self) -> f64 {
        self.0.0 * 100.0
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} €", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}€", self.0)
    }
}
