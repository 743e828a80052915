//! Input checks shared by the primitives
//!
//! Each helper returns `Ok(())` or the matching [`Error`] variant, so call
//! sites read as a single `?` line.

use super::{Error, Result};

fn length_error(context: &'static str, expected: usize, actual: usize) -> Error {
    Error::Length {
        context,
        expected,
        actual,
    }
}

/// `condition` must hold for parameter `name`
#[inline]
pub fn parameter(condition: bool, name: &'static str, reason: &'static str) -> Result<()> {
    condition.then_some(()).ok_or(Error::param(name, reason))
}

/// `actual == expected`
#[inline]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    (actual == expected)
        .then_some(())
        .ok_or_else(|| length_error(context, expected, actual))
}

/// `actual >= min`; the error reports `min` as the expected length
#[inline]
pub fn min_length(context: &'static str, actual: usize, min: usize) -> Result<()> {
    (actual >= min)
        .then_some(())
        .ok_or_else(|| length_error(context, min, actual))
}

/// `actual <= max`; the error reports `max` as the expected length
#[inline]
pub fn max_length(context: &'static str, actual: usize, max: usize) -> Result<()> {
    (actual <= max)
        .then_some(())
        .ok_or_else(|| length_error(context, max, actual))
}

/// A decoded point passed its curve check
#[inline]
pub fn point(is_valid: bool, context: &'static str, reason: &'static str) -> Result<()> {
    is_valid
        .then_some(())
        .ok_or(Error::Point { context, reason })
}
