pub mod plugin;
pub mod provider;

pub use plugin::{DEFAULT_PLUGIN_ID, PluginClient};
pub use provider::{ActionClient, ClientError};
