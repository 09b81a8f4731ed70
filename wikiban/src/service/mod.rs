//! Board service commands
//!
//! The only surface external callers (an HTTP handler, typically) talk to.
//! Each request maps to one command struct; executing it against a
//! [`BoardContext`](crate::BoardContext) returns the JSON payload for the
//! response body.

mod fetch;
mod meta;
mod ticket;
mod update;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::Result;

pub use fetch::FetchBoard;
pub use meta::BoardMeta;
pub use ticket::SaveTicket;
pub use update::UpdateBoard;

/// A board service command
#[async_trait]
pub trait Execute {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value>;
}

/// Parse a comma-separated id list, skipping anything non-numeric.
/// Query values like `add=1,2,x,3` come out as `[1, 2, 3]`.
pub fn parse_id_list(raw: &str) -> Vec<u64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("1,2,3"), vec![1, 2, 3]);
        assert_eq!(parse_id_list(" 4, 5 "), vec![4, 5]);
        assert_eq!(parse_id_list("1,x,3"), vec![1, 3]);
        assert_eq!(parse_id_list(""), Vec::<u64>::new());
    }
}
