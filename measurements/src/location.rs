use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::measurement::{Clearable, Comparable, Copyable};
use crate::parse::{parse_location, ParseLocationError};

/// A point `(x, y)` in the world, or a delta between two points.
///
/// Nothing about the numeric range is enforced: NaN and the infinities are
/// ordinary values here and flow through arithmetic like any other `f64`.
/// Equality is exact on both fields.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    /// Creates a new Location at the given coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Location { x, y }
    }

    /// Creates a Location at (0,0).
    pub fn origin() -> Self {
        Location { x: 0.0, y: 0.0 }
    }

    /// Copies the coordinates of `source`, or returns the origin when there is no source.
    pub fn copy_of(source: Option<&Location>) -> Self {
        source.map_or_else(Location::origin, |loc| Location::new(loc.x, loc.y))
    }

    /// Parses the canonical `"(x,y)"` form. See [`crate::parse`] for the exact rules.
    pub fn from_text(text: &str) -> Result<Self, ParseLocationError> {
        parse_location(text)
    }

    pub fn add_x(&mut self, dx: f64) {
        self.x += dx;
    }

    pub fn add_y(&mut self, dy: f64) {
        self.y += dy;
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    pub fn set_coords(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Overwrites both coordinates with those of `other`.
    ///
    /// Use this instead of rebinding when the caller only holds a `&mut Location`.
    pub fn duplicate(&mut self, other: &Location) {
        self.x = other.x;
        self.y = other.y;
    }

    /// Moves this location by `delta`.
    pub fn apply_delta(&mut self, delta: &Location) {
        self.apply_delta_xy(delta.x, delta.y);
    }

    /// Moves this location by `(dx, dy)`.
    pub fn apply_delta_xy(&mut self, dx: f64, dy: f64) {
        self.add_x(dx);
        self.add_y(dy);
    }

    /// Undoes a previous [`apply_delta`](Self::apply_delta) with the same delta.
    pub fn revert(&mut self, delta: &Location) {
        self.x -= delta.x;
        self.y -= delta.y;
    }

    pub fn clear(&mut self) {
        self.set_coords(0.0, 0.0);
    }

    /// Replaces each coordinate with its additive inverse.
    pub fn negate(&mut self) {
        self.x = -self.x;
        self.y = -self.y;
    }

    /// Multiplies both coordinates by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.x *= factor;
        self.y *= factor;
    }

    /// Multiplies each coordinate by the matching coordinate of `factors`.
    pub fn scale_by(&mut self, factors: &Location) {
        self.x *= factors.x;
        self.y *= factors.y;
    }

    /// Exchanges `x` and `y`.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.x, &mut self.y);
    }

    /// Returns an independent Location with the same coordinates.
    pub fn copy(&self) -> Location {
        *self
    }

    /// Writes these coordinates into `target`.
    pub fn copy_to(&self, target: &mut Location) {
        target.duplicate(self);
    }

    /// Exact comparison of both fields. NaN never equals anything.
    pub fn equals(&self, other: &Location) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// True only if **both** coordinates are strictly greater.
    pub fn is_greater_than(&self, other: &Location) -> bool {
        self.x > other.x && self.y > other.y
    }

    /// True only if **both** coordinates are strictly less.
    pub fn is_less_than(&self, other: &Location) -> bool {
        self.x < other.x && self.y < other.y
    }

    /// [`is_greater_than`](Self::is_greater_than) or [`equals`](Self::equals).
    /// Not the same as a componentwise `>=`: `(1,5)` vs `(1,2)` is `false`.
    pub fn is_greater_or_equal(&self, other: &Location) -> bool {
        self.is_greater_than(other) || self.equals(other)
    }

    /// [`is_less_than`](Self::is_less_than) or [`equals`](Self::equals).
    pub fn is_less_or_equal(&self, other: &Location) -> bool {
        self.is_less_than(other) || self.equals(other)
    }

    /// Returns `(-x, -y)` without touching `self`.
    pub fn opposite(&self) -> Location {
        Location::new(-self.x, -self.y)
    }

    /// Returns `(1/x, 1/y)`. A zero coordinate yields a signed infinity.
    pub fn reciprocal(&self) -> Location {
        Location::new(1.0 / self.x, 1.0 / self.y)
    }

    /// Angle in radians at the fulcrum formed with `other`, computed as
    /// `asin(dy / hypot(dy, dx))` where `(dx, dy) = self - other`.
    ///
    /// The result lies in `[-pi/2, pi/2]`, so it does not distinguish left from
    /// right the way `atan2` would. Coincident points give NaN.
    pub fn angle_from_fulcrum(&self, other: &Location) -> f64 {
        let dy = self.y - other.y;
        let dx = self.x - other.x;
        (dy / dy.hypot(dx)).asin()
    }

    /// The canonical `"(x,y)"` form with two digits after each decimal point.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

/// Rounds `value` to two decimals, half-up on its shortest decimal form.
///
/// `{:.2}` would round the exact binary value instead, so `1.005` (stored as
/// 1.00499999...) would print as `1.00` rather than `1.01`.
fn format_two_decimals(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    // f64 Display never uses exponent notation.
    let shortest = value.abs().to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    // Integer digits followed by exactly two fraction digits, zero-padded.
    let kept_frac = frac_part.bytes().chain(std::iter::repeat(b'0')).take(2);
    let mut digits: Vec<u8> = int_part.bytes().chain(kept_frac).collect();
    if frac_part.as_bytes().get(2).is_some_and(|&d| d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - 2;
    let mut text = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        text.push('-');
    }
    // Digits are ASCII.
    text.extend(digits[..split].iter().map(|&d| d as char));
    text.push('.');
    text.extend(digits[split..].iter().map(|&d| d as char));
    text
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", format_two_decimals(self.x), format_two_decimals(self.y))
    }
}

impl FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_location(s)
    }
}

impl TryFrom<&str> for Location {
    type Error = ParseLocationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_location(value)
    }
}

impl From<(f64, f64)> for Location {
    fn from(value: (f64, f64)) -> Self {
        Location::new(value.0, value.1)
    }
}

impl From<Location> for (f64, f64) {
    fn from(value: Location) -> Self {
        (value.x, value.y)
    }
}

impl Clearable for Location {
    fn clear(&mut self) {
        Location::clear(self);
    }
}

impl Copyable for Location {
    fn duplicate(&mut self, other: &Self) {
        Location::duplicate(self, other);
    }
}

impl Comparable for Location {
    fn equals(&self, other: &Self) -> bool {
        Location::equals(self, other)
    }
    fn is_greater_than(&self, other: &Self) -> bool {
        Location::is_greater_than(self, other)
    }
    fn is_less_than(&self, other: &Self) -> bool {
        Location::is_less_than(self, other)
    }
}

// Implement standard operators for convenience
impl Add for Location {
    type Output = Self;
    fn add(mut self, delta: Self) -> Self {
        self.apply_delta(&delta);
        self
    }
}

impl AddAssign for Location {
    fn add_assign(&mut self, delta: Self) {
        self.apply_delta(&delta);
    }
}

impl Sub for Location {
    type Output = Self;
    fn sub(mut self, delta: Self) -> Self {
        self.revert(&delta);
        self
    }
}

impl SubAssign for Location {
    fn sub_assign(&mut self, delta: Self) {
        self.revert(&delta);
    }
}

impl Neg for Location {
    type Output = Self;
    fn neg(self) -> Self {
        self.opposite()
    }
}

impl Mul<f64> for Location {
    type Output = Self;
    fn mul(mut self, factor: f64) -> Self {
        self.scale(factor);
        self
    }
}
