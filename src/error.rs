use crate::types::IndividualId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneCoreError {
    #[error("Chromosome is not initialized")]
    ChromosomeNotInitialized,

    #[error("Chromosome is already initialized")]
    ChromosomeAlreadyInitialized,

    #[error("Invalid chromosome size: {0}")]
    InvalidChromosomeSize(usize),

    #[error("Position {index} out of genome range, genome length {length}")]
    GeneOutOfRange { index: usize, length: usize },

    #[error("Provided gene sequence was empty")]
    EmptyGenes,

    #[error("Individual {0} has no chromosome")]
    ChromosomeMissing(IndividualId),

    #[error("Individual {0} already has a chromosome")]
    ChromosomeAlreadyAttached(IndividualId),

    #[error("Population not set")]
    PopulationNotSet,

    #[error("Population already set")]
    PopulationAlreadySet,

    #[error("Population is not ordered")]
    PopulationNotOrdered,

    #[error("Population is empty")]
    EmptyPopulation,

    #[error("Requested {requested} individuals, population has {available}")]
    NotEnoughIndividuals { requested: usize, available: usize },

    #[error("Individual {0} not found from population")]
    IndividualNotFound(IndividualId),

    #[error("Individual {0} already exists in population")]
    DuplicateIndividual(IndividualId),

    #[error("There are less individuals ({available}) than the required parent count ({required})")]
    InsufficientParents { required: usize, available: usize },

    #[error("Cannot choose {requested} unique crossover points from {available} positions")]
    InsufficientCrossoverPoints { requested: usize, available: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Process not initialized")]
    ProcessNotInitialized,

    #[error("Process already initialized")]
    ProcessAlreadyInitialized,

    #[error("Tried to access population while a generation is running")]
    GenerationInFlight,

    #[error("A previous generation failed part-way; process state is unreliable")]
    GenerationInterrupted,

    #[error("Process was not completed before build. Missing: {}", missing.join(", "))]
    ProcessNotCompleted { missing: Vec<String> },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, GeneCoreError>;
