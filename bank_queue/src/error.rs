//! Error types for the bank simulation.

/// Rejected simulation inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("arrival rate must be greater than zero and at most 700 per minute, got {0}")]
    InvalidLambda(f64),

    #[error("at least one teller is required")]
    NoTellers,

    #[error("could not parse {field} from {input:?}")]
    Parse { field: &'static str, input: String },

    #[error("no value given for {field}")]
    MissingInput { field: &'static str },
}

/// Failures that end a simulation run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("wait-time log could not grow past {recorded} entries")]
    WaitLogExhausted { recorded: usize },
}
