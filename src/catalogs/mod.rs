//! Raw star catalog formats.

pub mod yale;
