//! Validation utilities for primitives

use super::{Error, Result};

/// Validate a parameter condition
#[inline(always)]
pub fn parameter(condition: bool, name: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::param(name, reason));
    }
    Ok(())
}

/// Validate a length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::Length {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate that a length is one of several accepted values
#[inline(always)]
pub fn one_of_lengths(context: &'static str, actual: usize, accepted: &[usize]) -> Result<()> {
    if !accepted.contains(&actual) {
        return Err(Error::Length {
            context,
            expected: accepted.first().copied().unwrap_or_default(),
            actual,
        });
    }
    Ok(())
}

/// Validate a length is a non-zero multiple of `block`
#[inline(always)]
pub fn block_multiple(context: &'static str, actual: usize, block: usize) -> Result<()> {
    if actual % block != 0 {
        return Err(Error::Length {
            context,
            expected: (actual / block + 1) * block,
            actual,
        });
    }
    Ok(())
}

/// Validate a length range, inclusive on both ends
#[inline(always)]
pub fn length_range(context: &'static str, actual: usize, min: usize, max: usize) -> Result<()> {
    if actual < min {
        return Err(Error::Length {
            context,
            expected: min,
            actual,
        });
    }
    if actual > max {
        return Err(Error::Length {
            context,
            expected: max,
            actual,
        });
    }
    Ok(())
}
