//! Eye diagram width measurement.
//!
//! [`eye`] holds the pure transform from an eye density histogram and a voltage
//! band to per-row eye widths. [`filter`] wraps it in the filter-graph contract
//! (input validation, parameters, output streams, catalog).
pub mod eye;
pub mod filter;
