//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response body of `GET /api/stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsDto {
    pub connections: usize,
    pub authenticated: usize,
    pub history: usize,
}
