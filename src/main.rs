use anyhow::{Context, Result};
use genecore::config::ConfigManager;
use genecore::engines::genetics::Individual;
use genecore::engines::operators::{RandomMutationModifier, RandomPopulationInitializer};
use genecore::engines::process::{LogProgressCallback, ProcessBuilder};

/// Max-ones: fitness is the number of `true` genes.
fn count_ones(individual: &Individual<bool>) -> f64 {
    individual
        .genome()
        .map(|genes| genes.iter().filter(|gene| **gene).count() as f64)
        .unwrap_or(0.0)
}

fn main() -> Result<()> {
    let config_path = std::env::args().nth(1);

    let manager = ConfigManager::new();
    manager
        .load_layered(config_path.as_deref())
        .context("Failed to load configuration")?;
    let config = manager.get()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level)).init();

    let settings = &config.process;
    let mut builder = ProcessBuilder::from_config(settings)?
        .with_fitness_function(count_ones)
        .with_population_initializer(RandomPopulationInitializer::booleans(settings.chromosome_length)?)
        .with_progress_callback(LogProgressCallback);

    if settings.mutation_rate > 0.0 {
        builder = builder.with_population_modifier(RandomMutationModifier::booleans(settings.mutation_rate)?);
    }

    let mut process = builder.build().context("Failed to assemble process")?;
    process.initialize()?;
    process.run_until_convergence().context("Evolution aborted")?;

    let fittest = process.fittest()?;
    let genome: String = fittest
        .individual
        .genome()?
        .iter()
        .map(|gene| if *gene { '1' } else { '0' })
        .collect();

    println!(
        "Converged after {} generations. Fittest {} scored {}",
        process.generation(),
        fittest.id().short(),
        fittest.fitness
    );
    println!("{}", genome);

    if let Some(last) = process.history().last() {
        println!("{}", serde_json::to_string_pretty(last)?);
    }

    Ok(())
}
