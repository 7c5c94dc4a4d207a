//! Loan application input model.
//!
//! - [`ApplicationRequest`] - normalized payload: holders plus the requested loan
//! - [`normalize_application`] - outer shape check and date canonicalization

mod errors;
mod normalize;
mod request;

pub use errors::InputNormalizationError;
pub use normalize::{normalize_application, parse_date};
pub use request::{ApplicationRequest, BIRTH_DATE_KEY, HOLDERS_KEY, LOAN_REQUEST_KEY, PERSONAL_KEY};
