// src/query/tree.rs
//! Bounded materialization of block subtrees.
//!
//! Depth bounds each branch; the block budget is shared by the whole
//! traversal and is checked before every node is emitted, so the total
//! size of a returned tree never exceeds the cap regardless of depth.

use super::visited::VisitTracker;
use crate::api::CacheRepository;
use crate::error::AppError;
use crate::formatting::rich_text::truncate;
use crate::model::{ChildPageNode, ContentNode};
use crate::types::{canonicalize, page_url};

/// Limits applied while materializing a page's content tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLimits {
    /// Levels of children to descend; 0 emits nothing.
    pub depth: usize,
    /// Maximum number of blocks across the whole tree.
    pub max_blocks: usize,
    /// Maximum characters of text per block.
    pub text_length: usize,
}

/// Running count of emitted blocks, threaded through the recursion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockBudget {
    cap: usize,
    emitted: usize,
}

impl BlockBudget {
    pub fn new(cap: usize) -> Self {
        Self { cap, emitted: 0 }
    }

    pub fn is_exhausted(&self) -> bool {
        self.emitted >= self.cap
    }

    /// Claims one block. Returns `false` once the cap is reached.
    pub fn take(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.emitted += 1;
        true
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

/// Materializes the subtree below `root_id`.
///
/// A block already emitted (or the root itself) is skipped if a corrupted
/// parent chain leads back to it.
pub fn materialize_children(
    repo: &dyn CacheRepository,
    root_id: &str,
    limits: &TreeLimits,
    budget: &mut BlockBudget,
) -> Result<Vec<ContentNode>, AppError> {
    let mut visited = VisitTracker::starting_at(root_id);
    descend_blocks(repo, root_id, 0, limits, budget, &mut visited)
}

fn descend_blocks(
    repo: &dyn CacheRepository,
    parent_id: &str,
    level: usize,
    limits: &TreeLimits,
    budget: &mut BlockBudget,
    visited: &mut VisitTracker,
) -> Result<Vec<ContentNode>, AppError> {
    if level >= limits.depth || budget.is_exhausted() {
        return Ok(Vec::new());
    }

    let children = repo.child_blocks(parent_id)?;
    let mut nodes = Vec::with_capacity(children.len());

    for child in children {
        if !visited.visit(&child.id) {
            log::warn!("Block {} reappears below {}; skipping", child.id, parent_id);
            continue;
        }
        if !budget.take() {
            break;
        }
        let grandchildren = descend_blocks(repo, &child.id, level + 1, limits, budget, visited)?;
        nodes.push(ContentNode {
            id: canonicalize(&child.id),
            text: truncate(&child.display_text(), limits.text_length),
            block_type: child.block_type,
            children: grandchildren,
        });
    }

    Ok(nodes)
}

/// Lists page-type descendants of `root_id` as a nested forest `depth` levels deep.
pub fn child_page_forest(
    repo: &dyn CacheRepository,
    root_id: &str,
    depth: usize,
) -> Result<Vec<ChildPageNode>, AppError> {
    let mut visited = VisitTracker::starting_at(root_id);
    descend_pages(repo, root_id, 0, depth, &mut visited)
}

fn descend_pages(
    repo: &dyn CacheRepository,
    parent_id: &str,
    level: usize,
    depth: usize,
    visited: &mut VisitTracker,
) -> Result<Vec<ChildPageNode>, AppError> {
    if level >= depth {
        return Ok(Vec::new());
    }

    let mut nodes = Vec::new();
    for page in repo.child_pages(parent_id)? {
        if !visited.visit(&page.id) {
            log::warn!("Page {} reappears below {}; skipping", page.id, parent_id);
            continue;
        }
        let children = descend_pages(repo, &page.id, level + 1, depth, visited)?;
        nodes.push(ChildPageNode {
            id: canonicalize(&page.id),
            title: page.title(),
            url: page_url(&page.id),
            children,
        });
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_never_exceeds_cap() {
        let mut budget = BlockBudget::new(2);
        assert!(budget.take());
        assert!(budget.take());
        assert!(!budget.take());
        assert!(budget.is_exhausted());
        assert_eq!(budget.emitted(), 2);
    }

    #[test]
    fn zero_cap_is_exhausted_immediately() {
        let mut budget = BlockBudget::new(0);
        assert!(budget.is_exhausted());
        assert!(!budget.take());
        assert_eq!(budget.emitted(), 0);
    }
}
