//! Meal plan aggregation and template application.
//!
//! Pipeline: Template → Catalog Resolution → Plan Skeleton → Edits → Summary

mod aggregator;
mod templates;

pub use aggregator::*;
pub use templates::*;

use thiserror::Error;

use crate::error::ErrorKind;
use crate::models::{Day, MealSlot};

/// Meal plan errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("No entry {index} in {day} {slot} ({len} entries)")]
    EntryOutOfRange {
        day: Day,
        slot: MealSlot,
        index: usize,
        len: usize,
    },
}

impl PlanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlanError::EntryOutOfRange { .. } => ErrorKind::Validation,
        }
    }
}

pub type PlanResult<T> = Result<T, PlanError>;
