pub mod loader;
pub mod schema;

pub use loader::{
    default_config_path, load_config, load_config_from_str, load_config_with_env, CONFIG_ENV_VAR,
};
pub use schema::{Config, ConfigFile, Endpoint, EndpointConfig, EndpointsFile, HttpConfig};
