//! Library side of the meter-audit CLI.

pub mod logging;
pub mod pipeline;
