//! Error handling and exit codes.

use chudpi_core::calculator::PiError;
use chudpi_core::constants::exit_codes;

/// Map a calculation error to its exit code.
#[must_use]
pub fn handle_error(err: &PiError) -> i32 {
    match err {
        PiError::Calculation(_) | PiError::InvalidInput(_) => exit_codes::ERROR_GENERIC,
        PiError::Config(_) => exit_codes::ERROR_CONFIG,
        PiError::Mismatch => exit_codes::ERROR_MISMATCH,
    }
}

/// Exit code for an application error; non-calculation errors are generic.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<PiError>()
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}
