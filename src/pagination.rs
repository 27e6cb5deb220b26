use serde::{Deserialize, Serialize};

use crate::config;

/// Limit/offset query parameters accepted by every listing route
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageQuery {
    /// Resolve to an effective (limit, offset) using the configured
    /// default page size and maximum
    pub fn resolve(self) -> (i64, i64) {
        let api = &config::config().api;
        clamp(self.limit, self.offset, api.default_page_size, api.max_page_size)
    }
}

fn clamp(limit: Option<i64>, offset: Option<i64>, default_limit: i64, max_limit: i64) -> (i64, i64) {
    let limit = match limit {
        Some(l) if l > 0 => l.min(max_limit),
        _ => default_limit,
    };
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}

/// Limit/offset response envelope with total count and relative page links
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T: Serialize> Page<T> {
    pub fn new(path: &str, limit: i64, offset: i64, count: i64, results: Vec<T>) -> Self {
        let next = if offset + limit < count {
            Some(format!("{}?limit={}&offset={}", path, limit, offset + limit))
        } else {
            None
        };

        let previous = if offset > 0 {
            Some(format!("{}?limit={}&offset={}", path, limit, (offset - limit).max(0)))
        } else {
            None
        };

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}
