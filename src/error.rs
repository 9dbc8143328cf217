use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Invalid Unity version '{0}'\n\n\
             Hint: Unity versions look like \"2022.3\" or \"2022.3.22f1\".\n\
             Only the major and minor components are used for compatibility checks.")]
    InvalidUnityVersion(String),

    #[error("Invalid snapshot: {0}\n\n\
             Hint: Catalog snapshots are a JSON array of package manifests, each with a\n\
             \"source\" field. Project snapshots are a JSON object:\n\n\
             {{\n\
               \"unity\": \"2022.3.22f1\",\n\
               \"packages\": [ {{ \"name\": \"com.vrchat.avatars\", \"version\": \"3.7.0\" }} ]\n\
             }}")]
    InvalidSnapshot(String),

    #[error("Repository '{0}' is not configured\n\n\
             Hint: List configured repositories with: vpm-catalog config show")]
    RepositoryNotConfigured(String),

    #[error("{0}")]
    Other(String),
}
