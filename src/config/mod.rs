mod settings;

pub use settings::{
    GitHubConfig, LoggingConfig, MatrixConfig, OtelConfig, ServerConfig, Settings,
};
