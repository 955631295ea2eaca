//! Tenant scoping — the `X-Tenant-Id` header extractor.
//!
//! Authentication happens upstream; this adapter trusts the header the
//! gateway injects and only enforces that it is present and well-formed.

use std::str::FromStr;

use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use ringflow_domain::id::TenantId;

use crate::error::error_response;

/// Header carrying the tenant scope of a management API request.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Extractor for the request's tenant scope.
pub struct Tenant(pub TenantId);

/// Rejection for missing or malformed tenant headers.
#[derive(Debug, PartialEq, Eq)]
pub enum TenantRejection {
    Missing,
    Malformed,
}

impl IntoResponse for TenantRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::Missing => format!("missing {TENANT_HEADER} header"),
            Self::Malformed => format!("malformed {TENANT_HEADER} header"),
        };
        error_response(StatusCode::BAD_REQUEST, message)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Tenant {
    type Rejection = TenantRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(TENANT_HEADER)
            .ok_or(TenantRejection::Missing)?;
        let value = value.to_str().map_err(|_| TenantRejection::Malformed)?;
        let tenant = TenantId::from_str(value).map_err(|_| TenantRejection::Malformed)?;
        Ok(Self(tenant))
    }
}
