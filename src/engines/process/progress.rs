use super::information::ProcessInformation;
use std::sync::mpsc::Sender;

/// Observer of a running process. Purely observational.
pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: u64);
    fn on_generation_complete(&mut self, information: &ProcessInformation);
    fn on_converged(&mut self, information: &ProcessInformation);
}

pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: u64) {
        log::debug!("Generation {} starting...", generation);
    }

    fn on_generation_complete(&mut self, information: &ProcessInformation) {
        log::info!(
            "Generation {} complete. Fittest: {:.4} ({:+.4}), top mean: {:.4}, total: {:.4}",
            information.generation,
            information.fittest_fitness,
            information.fittest_fitness_delta,
            information.fittest_n_fitness,
            information.total_fitness
        );
    }

    fn on_converged(&mut self, information: &ProcessInformation) {
        log::info!(
            "Converged after {} generations with fittest {:.4}",
            information.generation,
            information.fittest_fitness
        );
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(u64),
    GenerationComplete(ProcessInformation),
    Converged(ProcessInformation),
}

/// Forwards progress to another thread, e.g. a UI.
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: u64) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, information: &ProcessInformation) {
        let _ = self
            .sender
            .send(ProgressMessage::GenerationComplete(information.clone()));
    }

    fn on_converged(&mut self, information: &ProcessInformation) {
        let _ = self.sender.send(ProgressMessage::Converged(information.clone()));
    }
}
