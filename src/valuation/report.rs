//! Human-readable rendering of a [`Valuation`].
//!
//! Kept apart from the computation so callers that only need numbers never
//! touch strings.

use std::fmt;

use super::valuator::Valuation;

impl fmt::Display for Valuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The estimated property value is {}.",
            Dollars(self.estimate)
        )?;
        write!(
            f,
            "At {} confidence the valuation range is {} at the lower end to {} at the high end.",
            self.confidence,
            Dollars(self.lower),
            Dollars(self.upper)
        )
    }
}

/// Whole-dollar amount with thousands separators, e.g. `$1,234,000`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dollars(pub f64);

impl fmt::Display for Dollars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.0.round();
        let digits = format!("{:.0}", rounded.abs());

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if rounded < 0.0 {
            write!(f, "-${grouped}")
        } else {
            write!(f, "${grouped}")
        }
    }
}
