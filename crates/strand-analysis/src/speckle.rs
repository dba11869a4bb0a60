//! Speckles model the sparse fluorescent monomers seen in speckle microscopy:
//! points scattered along a fiber with exponentially distributed spacing,
//! fixed relative to the fiber lattice for the lifetime of the fiber.
//!
//! Points are generated outward from abscissa 0 in both directions. A leg
//! whose span does not reach 0 starts at the nearest end of the span instead,
//! so the cost is proportional to the number of emitted speckles. Gaps are
//! exponential, hence the shifted start leaves the point density unchanged.
//! Each direction advances its own 32-bit state through a fixed linear
//! congruential recurrence:
//!
//! * towards the minus end: `z = signature`, then [`lcrng2`] before each draw;
//! * towards the plus end: `z = !signature`, then [`lcrng1`] before each draw.
//!
//! A draw maps `z` to `u` in (0, 1) with [`unit_interval`] and the gap is
//! `-mean * ln(u)`. Output is therefore a pure function of the fiber
//! signature, its abscissa span and the mean interval.

use strand_core::{lcrng1, lcrng2, unit_interval, ErrorInfo, ReportError};
use strand_state::{Fiber, SimObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leg {
    Minus,
    Plus,
    Done,
}

/// Abscissas of the speckles of one fiber.
///
/// Minus-direction points come first in decreasing order, followed by the
/// plus-direction points in increasing order. Cloning yields an iterator
/// that replays the same sequence from the current position.
#[derive(Debug, Clone)]
pub struct Speckles {
    signature: u32,
    mean: f64,
    minus: f64,
    plus: f64,
    leg: Leg,
    state: u32,
    abscissa: f64,
}

impl Speckles {
    fn start(signature: u32, mean: f64, minus: f64, plus: f64) -> Self {
        let mut speckles = Self {
            signature,
            mean,
            minus,
            plus,
            leg: Leg::Done,
            state: signature,
            abscissa: 0.0,
        };
        if minus < 0.0 {
            speckles.leg = Leg::Minus;
            speckles.abscissa = plus.min(0.0);
        } else {
            speckles.begin_plus();
        }
        speckles
    }

    fn begin_plus(&mut self) {
        if self.plus > 0.0 {
            self.leg = Leg::Plus;
            self.state = !self.signature;
            self.abscissa = self.minus.max(0.0);
        } else {
            self.leg = Leg::Done;
        }
    }

    /// Sequence from the first speckle again, regardless of progress.
    pub fn restart(&self) -> Self {
        Self::start(self.signature, self.mean, self.minus, self.plus)
    }
}

impl Iterator for Speckles {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        loop {
            match self.leg {
                Leg::Minus => {
                    self.state = lcrng2(self.state);
                    self.abscissa += self.mean * unit_interval(self.state).ln();
                    if self.abscissa > self.plus {
                        continue;
                    }
                    if self.abscissa >= self.minus {
                        return Some(self.abscissa);
                    }
                    self.begin_plus();
                }
                Leg::Plus => {
                    self.state = lcrng1(self.state);
                    self.abscissa -= self.mean * unit_interval(self.state).ln();
                    if self.abscissa < self.minus {
                        continue;
                    }
                    if self.abscissa <= self.plus {
                        return Some(self.abscissa);
                    }
                    self.leg = Leg::Done;
                }
                Leg::Done => return None,
            }
        }
    }
}

/// Speckles of `fiber` with mean spacing `mean_interval`.
pub fn speckles(fiber: &Fiber, mean_interval: f64) -> Result<Speckles, ReportError> {
    if !mean_interval.is_finite() || mean_interval <= 0.0 {
        return Err(ReportError::invalid_parameter(
            "interval",
            format!("speckle interval must be positive and finite, got {mean_interval}"),
        ));
    }
    let minus = fiber.abscissa_minus();
    let plus = fiber.abscissa_plus();
    if !minus.is_finite() || !plus.is_finite() {
        return Err(ReportError::State(
            ErrorInfo::new(
                "fiber_span",
                format!("fiber {} has a non-finite abscissa span", fiber.number()),
            )
            .with_context("fiber", fiber.number().to_string()),
        ));
    }
    Ok(Speckles::start(
        fiber.signature(),
        mean_interval,
        minus,
        plus,
    ))
}
