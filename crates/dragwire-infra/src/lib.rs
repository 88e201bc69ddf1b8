pub mod stream;
pub mod telemetry;
pub mod time;

pub use stream::{PipeSink, StaticChannel};
pub use telemetry::TracingTelemetry;
pub use time::SystemClock;
