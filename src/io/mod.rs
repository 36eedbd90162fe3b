/// Command-line interface and batch processing
pub mod cli;
/// Algorithm constants and defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Image loading and saving
pub mod image;
/// Optional text labels
pub mod labels;
/// Colour table shared by rendering and analysis
pub mod palette;
/// Progress bars for batch runs
pub mod progress;
/// Reference renderer for layouts
pub mod render;
/// Persisted learning state
pub mod session;
/// JSON key-value storage
pub mod store;
/// GIF export of the evolution history
pub mod visualization;
