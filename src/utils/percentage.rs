use std::{fmt::Display, ops::Deref};

/// Progress towards a target. 100% means the target was hit exactly.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0.round())
    }
}

impl Percentage {
    pub const ZERO: Percentage = Percentage(0.);

    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value < 0. || !value.is_finite() {
            None
        } else {
            Some(Percentage(value))
        }
    }

    /// Caps the value at `max` percent.
    pub fn clamp_to(self, max: f64) -> Percentage {
        Percentage(self.0.min(max))
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// How much of `target` minutes was covered by `worked` minutes. A zero target has no meaningful
/// progress and yields 0%.
pub fn minutes_percentage(worked: u32, target: u32) -> Percentage {
    if target == 0 {
        return Percentage::ZERO;
    }
    Percentage::new_opt(worked as f64 / target as f64 * 100.)
        .expect("Percentage should always be at least 0")
}
