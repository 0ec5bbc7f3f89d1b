#[derive(Debug, thiserror::Error)]
pub enum DocketError {
    /// Only raised while rendering resolved dockets for debug logs.
    #[error("failed to format [{type_name}] as JSON")]
    Serialize {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid path pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
