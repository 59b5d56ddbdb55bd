// src/query/ancestors.rs
//! Upward traversal of the parent chain.

use super::visited::VisitTracker;
use crate::api::CacheRepository;
use crate::error::AppError;
use crate::model::{AncestorNode, BlockRecord};
use crate::types::{canonicalize, page_url};

impl From<&BlockRecord> for AncestorNode {
    fn from(block: &BlockRecord) -> Self {
        let url = if block.is_page() {
            page_url(&block.id)
        } else {
            String::new()
        };
        Self {
            id: canonicalize(&block.id),
            title: block.title(),
            block_type: block.block_type.clone(),
            url,
        }
    }
}

/// Ancestors of `start_id`, immediate parent first and root last.
///
/// The walk stops at a root (no parent), at a dangling parent reference,
/// or on the first revisited id of a cyclic chain.
pub fn walk_ancestors(
    repo: &dyn CacheRepository,
    start_id: &str,
) -> Result<Vec<AncestorNode>, AppError> {
    let mut tracker = VisitTracker::default();
    let mut chain = Vec::new();
    let mut current = Some(start_id.to_string());
    let mut at_start = true;

    while let Some(id) = current.take() {
        if !tracker.visit(&id) {
            log::warn!("Parent chain of {} revisits {}; stopping", start_id, id);
            break;
        }

        let Some(block) = repo.find_block(&id)? else {
            log::debug!("Parent chain of {} ends at missing block {}", start_id, id);
            break;
        };

        if !at_start {
            chain.push(AncestorNode::from(&block));
        }
        at_start = false;
        current = block.parent_id.filter(|parent| !parent.is_empty());
    }

    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_page_ancestors_have_no_url() {
        let block = BlockRecord {
            id: "abc".into(),
            block_type: "column".into(),
            ..Default::default()
        };
        assert_eq!(AncestorNode::from(&block).url, "");
    }
}
