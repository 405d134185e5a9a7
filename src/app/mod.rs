mod runner;


pub(crate) use runner::{StopReason, run_dispatch};
