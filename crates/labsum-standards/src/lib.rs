#![deny(unsafe_code)]

//! Static clinical data: the exam synonym dictionary, reference intervals
//! and clinical display orders.

pub mod dictionary;
pub mod orders;
pub mod ranges;

pub use crate::dictionary::{ExamDictionary, default_dictionary};
pub use crate::orders::{FLAT_VENOUS_PARAMS, clinical_order, clinical_rank};
pub use crate::ranges::{reference_range, reference_ranges};
