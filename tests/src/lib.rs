//! End-to-end tests of the sweep pipeline.

mod stubs;

mod loopback;
mod pipeline;
