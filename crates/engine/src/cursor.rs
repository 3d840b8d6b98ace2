//! Opaque cursors for keyset pagination.
//!
//! Lists paginate newest → older by `(created_at DESC, id DESC)`. The cursor
//! carries the last row's sort key, serialized to JSON and base64-encoded so
//! clients treat it as opaque.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, Condition};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

pub(crate) const DEFAULT_PAGE: u64 = 50;
pub(crate) const MAX_PAGE: u64 = 500;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct PageCursor {
    pub created_at: DateTime<Utc>,
    pub id: String,
}

impl PageCursor {
    pub(crate) fn encode(&self) -> ResultEngine<String> {
        let bytes = serde_json::to_vec(self)
            .map_err(|_| EngineError::InvalidInput("invalid page cursor".to_string()))?;
        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
    }

    pub(crate) fn decode(input: &str) -> ResultEngine<Self> {
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(input.as_bytes())
            .map_err(|_| EngineError::InvalidInput("invalid page cursor".to_string()))?;
        serde_json::from_slice::<Self>(&bytes)
            .map_err(|_| EngineError::InvalidInput("invalid page cursor".to_string()))
    }
}

/// Clamp a client-supplied page size into `1..=MAX_PAGE`.
pub(crate) fn clamp_limit(limit: Option<u64>) -> u64 {
    limit.unwrap_or(DEFAULT_PAGE).clamp(1, MAX_PAGE)
}

/// Keyset condition for rows strictly older than the cursor under
/// `(created_at DESC, id DESC)` ordering.
pub(crate) fn keyset<C: ColumnTrait>(created_at: C, id: C, cursor: &PageCursor) -> Condition {
    Condition::any()
        .add(created_at.lt(cursor.created_at))
        .add(
            Condition::all()
                .add(created_at.eq(cursor.created_at))
                .add(id.lt(cursor.id.clone())),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_round_trips() {
        let cursor = PageCursor {
            created_at: Utc::now(),
            id: "b9b26c63-6c0c-4a69-8425-2f4e1e79d0d1".to_string(),
        };
        let encoded = cursor.encode().unwrap();
        let decoded = PageCursor::decode(&encoded).unwrap();
        assert_eq!(decoded.id, cursor.id);
        assert_eq!(decoded.created_at, cursor.created_at);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(PageCursor::decode("not a cursor").is_err());
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(clamp_limit(None), DEFAULT_PAGE);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(10_000)), MAX_PAGE);
    }
}
