pub mod builder;
pub mod checkpoint;
pub mod information;
pub mod orchestrator;
pub mod progress;

pub use builder::ProcessBuilder;
pub use checkpoint::Checkpoint;
pub use information::{FittestComposer, ProcessInformation, ProcessInformationComposer};
pub use orchestrator::{GeneticSelectionProcess, ProcessState};
pub use progress::{ChannelProgressCallback, LogProgressCallback, ProgressCallback, ProgressMessage};
