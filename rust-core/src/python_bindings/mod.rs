//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod tracker_bindings;

/// Python module definition
#[pymodule]
fn drift_tracker(_py: Python, m: &PyModule) -> PyResult<()> {
    tracker_bindings::register(m)
}
