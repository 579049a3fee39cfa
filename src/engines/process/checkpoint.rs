use super::information::ProcessInformation;
use crate::engines::genetics::{Gene, Population};
use crate::error::Result;

/// Hook called by the process every `interval()` generations with the freshly
/// ordered population. Saving anywhere is up to the implementor.
pub trait Checkpoint<G: Gene>: Send {
    fn interval(&self) -> u64;

    fn save(&mut self, information: &ProcessInformation, population: &Population<G>) -> Result<()>;

    fn is_due(&self, generation: u64) -> bool {
        let interval = self.interval();
        interval > 0 && generation % interval == 0
    }
}
