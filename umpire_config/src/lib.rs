pub mod config;
pub mod error;
pub mod parser;

pub use config::{
    AuthSettings, GraphiteSettings, LibratoSettings, ServerSettings, ServiceConfig,
    ServiceConfigFile,
};
pub use error::ConfigError;
pub use parser::{load_config, parse_config_from_file, parse_config_from_str};
