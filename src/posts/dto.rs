use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::posts::repo::Post;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub date_posted: OffsetDateTime,
    pub user_id: i64,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            date_posted: p.date_posted,
            user_id: p.user_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

impl Pagination {
    /// Keep query-supplied values inside what Postgres accepts: LIMIT
    /// must be positive and OFFSET non-negative.
    pub fn clamped(self) -> Self {
        Self {
            limit: self.limit.clamp(1, 100),
            offset: self.offset.max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").expect("parse");
        assert_eq!(p.limit, 20);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn pagination_clamps_out_of_range_values() {
        let p = Pagination {
            limit: -1,
            offset: -5,
        }
        .clamped();
        assert_eq!(p.limit, 1);
        assert_eq!(p.offset, 0);

        let p = Pagination {
            limit: 10_000,
            offset: 3,
        }
        .clamped();
        assert_eq!(p.limit, 100);
        assert_eq!(p.offset, 3);
    }
}
