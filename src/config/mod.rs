mod settings;

pub use settings::{RequestConfig, SourcesConfig, VetConfig};
