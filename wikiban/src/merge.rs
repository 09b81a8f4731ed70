//! Ticket-order merging
//!
//! When a client submits a reordered column (after a drag-and-drop, say),
//! the submitted order is merged against the server's current list rather
//! than taken wholesale: relative order follows the client as closely as
//! possible, ids only the server knows about stay where the server had them,
//! and nothing is duplicated or lost.

use std::collections::HashSet;

/// Merge a client-submitted `incoming` ordering into the server's
/// `original` list.
///
/// When the client list is longer, the client has added items and its
/// payload is taken verbatim as the new canonical order. Otherwise the
/// server list is walked in order: an id the client also sent is emitted in
/// the client's order, pulling forward everything the client placed before
/// it; an id the client dropped stays at its server position.
///
/// ```
/// use wikiban::merge_order;
///
/// assert_eq!(merge_order(&[1, 2, 3, 4, 5], &[1, 4, 2, 5]), vec![1, 4, 2, 3, 5]);
/// assert_eq!(merge_order(&[1, 2], &[1, 2, 3]), vec![1, 2, 3]);
/// ```
pub fn merge_order(original: &[u64], incoming: &[u64]) -> Vec<u64> {
    if original.len() < incoming.len() {
        return incoming.to_vec();
    }

    let mut result = Vec::with_capacity(original.len());
    let mut placed: HashSet<u64> = HashSet::with_capacity(original.len());

    for &id in original {
        if placed.contains(&id) {
            continue;
        }
        if let Some(pos) = incoming.iter().position(|&other| other == id) {
            for &ahead in &incoming[..=pos] {
                if placed.insert(ahead) {
                    result.push(ahead);
                }
            }
        } else if placed.insert(id) {
            result.push(id);
        }
    }

    result
}
