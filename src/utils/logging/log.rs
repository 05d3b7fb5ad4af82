//! Logging utilities
//!
//! This module provides standardized logging functions for operations.

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `detail` - What the operation is being run on
pub fn log_operation_start(operation: &str, detail: &str) {
    log::info!("{operation}: {detail}");
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    items: usize,
    elapsed: Option<std::time::Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!("Successfully {operation} {items} items in {duration:?}");
    } else {
        log::info!("Successfully {operation} {items} items");
    }
}
