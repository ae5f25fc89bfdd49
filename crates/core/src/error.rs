#[derive(Debug, thiserror::Error)]
pub enum HerbalError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("required fields missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("catalog schema mismatch at {path}: {source}")]
    CatalogParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to read catalog file: {0}")]
    CatalogRead(std::io::Error),
    #[error("catalog integrity violation: {0}")]
    CatalogIntegrity(String),

    #[error("failed to read local store: {0}")]
    StoreRead(std::io::Error),
    #[error("failed to write local store: {0}")]
    StoreWrite(std::io::Error),
    #[error("failed to serialize local store value: {0}")]
    StoreSerialization(serde_json::Error),

    #[error("email is already registered")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email is already subscribed")]
    AlreadySubscribed,
    #[error("no recipients selected")]
    NoRecipients,

    #[error("unknown product: {0}")]
    UnknownProduct(String),
    #[error("product is out of stock: {0}")]
    OutOfStock(String),
    #[error("cart is empty")]
    EmptyCart,

    #[error("unknown region: {0}")]
    UnknownRegion(String),
    #[error("location already recorded: {0}")]
    DuplicateLocation(String),
    #[error("unknown distribution record: {0}")]
    UnknownDistribution(u32),
}

impl From<herbal_types::TextError> for HerbalError {
    fn from(err: herbal_types::TextError) -> Self {
        HerbalError::InvalidInput(err.to_string())
    }
}

pub type HerbalResult<T> = std::result::Result<T, HerbalError>;
