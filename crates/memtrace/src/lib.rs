mod errors;
mod trace;

pub use errors::TraceError;
pub use trace::read_trace;
pub use trace::Operation;
pub use trace::TraceEvent;
pub use trace::TraceReader;
