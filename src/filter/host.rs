//! Host/device coherence hooks.
//!
//! Buffers that may live on an accelerator are made readable on the host before
//! a filter touches them, and flagged after the host wrote them. This crate only
//! runs on the CPU, so the hooks reduce to bookkeeping.
use crate::eye::{EyeHistogram, SparseWaveform};

pub trait HostAccess {
    fn prepare_for_host_access(&self) {}

    fn mark_modified_on_host(&mut self) {}
}

impl HostAccess for EyeHistogram {}

impl HostAccess for SparseWaveform {
    fn mark_modified_on_host(&mut self) {
        self.revision += 1;
    }
}
