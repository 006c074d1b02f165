//! Query parameter extractors for list endpoints.

use serde::Deserialize;

/// Query parameters for the session list endpoint.
///
/// Absent values fall back to the configured pagination defaults; the
/// handler clamps whatever arrives into valid bounds.
#[derive(Debug, Deserialize, Default)]
pub struct SessionListQuery {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Sessions per page.
    pub limit: Option<u32>,
}
