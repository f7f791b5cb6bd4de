use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open map file: {0}")]
    MapOpen(String, #[source] std::io::Error),

    #[error("Failed to open catalog file: {0}")]
    CatalogOpen(String, #[source] std::io::Error),

    #[error("Failed to parse catalog file: {0}")]
    CatalogParse(String, #[source] serde_yaml::Error),
}
