#![forbid(unsafe_code)]

use std::fmt;

use crate::slots::SLOT_COUNT;

/// A navigation request the controller cannot honour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    /// The swiper reported a slot index outside `0..3`.
    SlotOutOfRange { index: usize },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SlotOutOfRange { index } => {
                write!(f, "slot index {index} out of range (expected 0..{SLOT_COUNT})")
            }
        }
    }
}

impl std::error::Error for NavigationError {}
