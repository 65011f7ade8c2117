/*!
 * Simulation Module
 * Scenario configuration, the policy-run driver, and trace reporting
 */

pub mod config;
pub mod driver;
pub mod report;

pub use config::{ProcessSpec, SimulationConfig, Step};
pub use driver::{Simulator, Snapshot, Trace};
pub use report::{render_json, render_text};
