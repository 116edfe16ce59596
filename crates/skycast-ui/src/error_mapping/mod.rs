//! Maps service crate errors to skycast_core::AppError for consistent
//! user-facing messages. One module per source crate.

mod favorites;
mod location;
mod weather;

use skycast_core::AppError;

/// Conversion into the application error type.
///
/// A trait rather than `From` impls because neither side of the conversion
/// is defined in this crate.
pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}
