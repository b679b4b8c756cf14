use crate::extractors::RejectionType;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use service::config::ApiVersion;

/// Rejects requests whose `x-version` header does not name a supported API
/// version. The header is required on every versioned endpoint.
pub(crate) struct CompareApiVersion(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CompareApiVersion
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let version = parts
            .headers
            .get(ApiVersion::field_name())
            .and_then(|value| value.to_str().ok())
            .ok_or((
                StatusCode::BAD_REQUEST,
                format!("Missing {} header", ApiVersion::field_name()),
            ))?;

        if !ApiVersion::versions().iter().any(|v| *v == version) {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Unsupported API version: {version}"),
            ));
        }

        Ok(CompareApiVersion(version.to_string()))
    }
}
