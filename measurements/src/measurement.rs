//! Capabilities shared by measurement-like value types.
//!
//! A type opts into each capability separately; anything implementing all
//! three is a [`Measurement`] and can be handled by the container helpers at
//! the bottom of this module.

/// A value that can be reset to its zero state in place.
pub trait Clearable {
    fn clear(&mut self);
}

/// A value whose contents can be copied between existing instances without
/// reallocating or rebinding either one.
pub trait Copyable {
    /// Overwrites `self` with the contents of `other`.
    fn duplicate(&mut self, other: &Self);

    /// Overwrites `target` with the contents of `self`.
    fn copy_to(&self, target: &mut Self) {
        target.duplicate(self);
    }
}

/// Partial ordering where `greater`/`less` must hold on every component.
///
/// Two values that differ in opposite directions are neither greater nor less
/// than each other, and since they are not equal either, both `_or_equal`
/// checks report `false` for them.
pub trait Comparable {
    /// Exact equality, no tolerance.
    fn equals(&self, other: &Self) -> bool;
    fn is_greater_than(&self, other: &Self) -> bool;
    fn is_less_than(&self, other: &Self) -> bool;

    /// Strictly greater, or exactly equal.
    fn is_greater_or_equal(&self, other: &Self) -> bool {
        self.is_greater_than(other) || self.equals(other)
    }

    /// Strictly less, or exactly equal.
    fn is_less_or_equal(&self, other: &Self) -> bool {
        self.is_less_than(other) || self.equals(other)
    }
}

/// Everything a shared container needs from a measurement.
pub trait Measurement: Clearable + Copyable + Comparable {}

impl<T: Clearable + Copyable + Comparable> Measurement for T {}

/// Resets every item in the slice.
pub fn clear_all<M: Measurement>(items: &mut [M]) {
    for item in items.iter_mut() {
        item.clear();
    }
}

/// Copies `source[i]` into `target[i]` for every index both slices share.
/// Returns the number of items copied.
pub fn copy_all<M: Measurement>(source: &[M], target: &mut [M]) -> usize {
    let count = source.len().min(target.len());
    for (from, to) in source.iter().zip(target.iter_mut()) {
        from.copy_to(to);
    }
    count
}

/// True if `value` is strictly greater than `lower` and strictly less than `upper`.
pub fn strictly_within<M: Measurement>(value: &M, lower: &M, upper: &M) -> bool {
    value.is_greater_than(lower) && value.is_less_than(upper)
}
