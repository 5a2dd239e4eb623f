use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Money, no particular currency.
pub type Cost = Quantity<0, 0, 1>;

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rounds_to_cents() {
        assert_eq!(Cost::from(133.333_333).to_string(), "133.33");
        assert_eq!(Cost::from(50.0).to_string(), "50.00");
    }
}
