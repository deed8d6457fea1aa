//! Time points and spans in beats.

use core::ops::{Add, AddAssign, Sub, SubAssign};

/// Absolute musical time point in beats, measured from the start of a piece.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimePoint(f64);

/// A musical duration in beats.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeSpan(f64);

impl TimePoint {
    /// Construct a time point with a non-negative beat value.
    #[must_use]
    pub fn new(beats: f64) -> Self {
        assert!(beats.is_finite() && beats >= 0.0, "time point must be non-negative and finite");
        Self(beats)
    }

    /// The origin, beat zero.
    #[must_use]
    pub const fn origin() -> Self {
        Self(0.0)
    }

    /// Raw beat value.
    #[must_use]
    pub fn as_beats(&self) -> f64 {
        self.0
    }

    /// Add a span, producing a new time point.
    #[must_use]
    pub fn add_span(self, span: TimeSpan) -> Self {
        Self::new(self.0 + span.0)
    }

    /// Subtract a span if possible, returning `None` when it would go negative.
    #[must_use]
    pub fn checked_sub_span(self, span: TimeSpan) -> Option<Self> {
        (self.0 >= span.0).then(|| Self::new(self.0 - span.0))
    }

    /// Distance to another point (always non-negative).
    #[must_use]
    pub fn distance_to(self, other: Self) -> TimeSpan {
        TimeSpan::new((self.0 - other.0).abs())
    }
}

impl TimeSpan {
    /// Construct a span from a raw beat count.
    ///
    /// # Panics
    ///
    /// Panics if `beats` is negative or not finite.
    #[must_use]
    pub fn new(beats: f64) -> Self {
        assert!(beats.is_finite() && beats >= 0.0, "duration must be non-negative and finite");
        Self(beats)
    }

    /// A zero-length span.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Raw beat count.
    #[must_use]
    pub fn as_beats(&self) -> f64 {
        self.0
    }

    /// Scale this span by a non-negative factor.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.0 * factor)
    }

    /// Add two spans.
    #[must_use]
    pub fn add_span(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }

    /// Subtract a smaller span, returning `None` if it would become negative.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        (self.0 >= other.0).then(|| Self::new(self.0 - other.0))
    }
}

impl Add<TimeSpan> for TimePoint {
    type Output = TimePoint;

    fn add(self, rhs: TimeSpan) -> Self::Output {
        self.add_span(rhs)
    }
}

impl Sub<TimeSpan> for TimePoint {
    type Output = TimePoint;

    fn sub(self, rhs: TimeSpan) -> Self::Output {
        self.checked_sub_span(rhs).expect("cannot subtract span beyond origin")
    }
}

impl Sub for TimePoint {
    type Output = TimeSpan;

    fn sub(self, rhs: Self) -> Self::Output {
        assert!(self.0 >= rhs.0, "time point subtraction cannot go negative");
        TimeSpan::new(self.0 - rhs.0)
    }
}

impl Add for TimeSpan {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.add_span(rhs)
    }
}

impl AddAssign for TimeSpan {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for TimeSpan {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("duration cannot go negative")
    }
}

impl SubAssign for TimeSpan {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_span_arithmetic() {
        let start = TimePoint::new(4.0);
        let span = TimeSpan::new(1.5);
        let end = start + span;
        assert!((end.as_beats() - 5.5).abs() < 1e-9);
        let original = end - span;
        assert!((original.as_beats() - start.as_beats()).abs() < 1e-9);
        let distance = end - start;
        assert!((distance.as_beats() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn scale_multiplies_length() {
        let span = TimeSpan::new(2.0);
        assert!((span.scale(1.5).as_beats() - 3.0).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "cannot subtract span beyond origin")]
    fn timepoint_sub_panics_when_negative() {
        let start = TimePoint::new(1.0);
        let span = TimeSpan::new(2.0);
        let _ = start - span;
    }
}
