use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvolutionError {
    #[error("Population size must be at least 1, got {0}")]
    InvalidPopulationSize(usize),

    #[error("Target must not be empty")]
    EmptyTarget,

    #[error("Target byte {byte} at position {position} is outside the printable gene range")]
    InvalidTarget { position: usize, byte: u8 },

    #[error("Degenerate population: {0}")]
    DegeneratePopulation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EvolutionError>;
