//! Analog clock face geometry
//!
//! Angles are in degrees, measured clockwise from 12 o'clock. Coordinates
//! are relative to the face center with y growing downward, so a hand at
//! angle 0 points to `(0, -r)`.

use chrono::Timelike;
use serde::Serialize;

/// A point relative to the face center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// The three clock hands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Hour,
    Minute,
    Second,
}

impl Hand {
    /// Hand length as a fraction of the face radius
    pub fn length_fraction(&self) -> f64 {
        match self {
            Hand::Hour => 0.50,
            Hand::Minute => 0.72,
            Hand::Second => 0.82,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandTips {
    pub hour: Point,
    pub minute: Point,
    pub second: Point,
}

impl HandAngles {
    /// Hand angles for a wall-clock time, including the sub-second fraction
    /// so the second hand sweeps smoothly
    pub fn from_time<T: Timelike>(t: &T) -> Self {
        let hour = f64::from(t.hour() % 12);
        let minute = f64::from(t.minute());
        // Leap seconds show up as nanosecond values >= 1e9; keep them on the 59 mark
        let nanos = t.nanosecond().min(999_999_999);
        let second = f64::from(t.second()) + f64::from(nanos) / 1e9;
        let whole_second = f64::from(t.second());

        Self {
            hour: (hour + minute / 60.0 + whole_second / 3600.0) * 30.0,
            minute: (minute + whole_second / 60.0) * 6.0,
            second: second * 6.0,
        }
    }

    pub fn angle(&self, hand: Hand) -> f64 {
        match hand {
            Hand::Hour => self.hour,
            Hand::Minute => self.minute,
            Hand::Second => self.second,
        }
    }

    /// Tip coordinates of each hand on a face of the given radius
    pub fn tips(&self, radius: f64) -> HandTips {
        let tip = |hand: Hand| hand_tip(radius * hand.length_fraction(), self.angle(hand));
        HandTips {
            hour: tip(Hand::Hour),
            minute: tip(Hand::Minute),
            second: tip(Hand::Second),
        }
    }
}

/// Point at `length` from the center in the direction of `angle_deg`
pub fn hand_tip(length: f64, angle_deg: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point {
        x: length * rad.sin(),
        y: -length * rad.cos(),
    }
}

/// One of the sixty tick marks around the dial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialMark {
    pub outer: Point,
    pub inner: Point,
    /// Hour marks are longer and drawn thicker
    pub major: bool,
}

const MARK_INSET: f64 = 10.0;
const MAJOR_MARK_LENGTH: f64 = 12.0;
const MINOR_MARK_LENGTH: f64 = 5.0;
const NUMERAL_INSET: f64 = 30.0;

/// The sixty minute marks for a face of the given radius
pub fn dial_marks(radius: f64) -> Vec<DialMark> {
    (0..60)
        .map(|i| {
            let angle = f64::from(i) * 6.0;
            let major = i % 5 == 0;
            let length = if major { MAJOR_MARK_LENGTH } else { MINOR_MARK_LENGTH };
            DialMark {
                outer: hand_tip(radius - MARK_INSET, angle),
                inner: hand_tip(radius - MARK_INSET - length, angle),
                major,
            }
        })
        .collect()
}

/// Positions of the numerals 1 through 12
pub fn numeral_positions(radius: f64) -> Vec<(u32, Point)> {
    (1..=12)
        .map(|h| (h, hand_tip(radius - NUMERAL_INSET, f64::from(h) * 30.0)))
        .collect()
}
