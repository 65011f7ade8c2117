/*!
 * Monitoring
 * Simulation events and tracing initialization
 */

mod events;
mod tracer;

pub use events::Event;
pub use tracer::init_tracing;
