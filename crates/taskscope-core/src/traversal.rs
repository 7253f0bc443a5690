//! Depth-first flattening of block trees into listed tasks.
//!
//! ```text
//! Block [web]                     ListedTask "apt"      tags [p, web]
//! ├── Task apt                ──▶ ListedTask "copy"     tags [cfg, p, web]
//! ├── Block [cfg]                 ListedTask "service"  tags [p, web]
//! │   ├── Task copy
//! │   └── Task meta   (skipped)
//! └── Task service
//! ```
//!
//! Traversal is pre-order and keeps declaration order at every level. It
//! walks an explicit stack, so deeply nested blocks do not grow the call
//! stack. Enclosing blocks form a parent-linked chain shared by every task
//! listed under them.

use std::rc::Rc;

use log::trace;

use crate::{
    models::{Block, BlockItem, Task},
    tags::{self, TagAggregator, TagSet},
};

/// Innermost enclosing block, linked to the blocks around it.
#[derive(Debug, PartialEq, Eq)]
struct Ancestry<'a> {
    block: &'a Block,
    parent: Option<Rc<Ancestry<'a>>>,
}

impl Drop for Ancestry<'_> {
    // Unlink iteratively so dropping a deep chain does not recurse.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(link) = parent {
            parent = match Rc::try_unwrap(link) {
                Ok(mut ancestry) => ancestry.parent.take(),
                Err(_) => None,
            };
        }
    }
}

/// A task reached by traversal, with the blocks enclosing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedTask<'a> {
    ancestry: Rc<Ancestry<'a>>,
    /// The task itself
    pub task: &'a Task,
    /// Play, ancestor block and task tags combined
    pub tags: TagSet,
}

impl<'a> ListedTask<'a> {
    /// Enclosing blocks, outermost first.
    pub fn ancestors(&self) -> Vec<&'a Block> {
        let mut blocks = Vec::new();
        let mut link = Some(&self.ancestry);
        while let Some(ancestry) = link {
            blocks.push(ancestry.block);
            link = ancestry.parent.as_ref();
        }
        blocks.reverse();
        blocks
    }
}

struct Frame<'a> {
    ancestry: Rc<Ancestry<'a>>,
    next: usize,
    tags: TagSet,
}

impl<'a> Frame<'a> {
    fn new(block: &'a Block, inherited: &TagSet, parent: Option<Rc<Ancestry<'a>>>) -> Self {
        Self {
            ancestry: Rc::new(Ancestry { block, parent }),
            next: 0,
            tags: tags::union(inherited, &block.tags),
        }
    }
}

/// Walks the filtered top-level blocks of one play.
#[derive(Debug, Clone)]
pub struct BlockTraversal {
    play_tags: TagSet,
    aggregator: TagAggregator,
}

impl BlockTraversal {
    /// Start a traversal for a play with the given declared tags.
    pub fn new(play_tags: &TagSet) -> Self {
        Self {
            play_tags: play_tags.clone(),
            aggregator: TagAggregator::new(play_tags),
        }
    }

    /// List every non-control task under `block`, in pre-order.
    pub fn visit<'a>(&mut self, block: &'a Block) -> Vec<ListedTask<'a>> {
        let mut listed = Vec::new();
        let mut stack = vec![Frame::new(block, &self.play_tags, None)];

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };
            let current: &'a Block = frame.ancestry.block;
            let Some(item) = current.items.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            match item {
                BlockItem::Block(child) => {
                    let child_frame =
                        Frame::new(child, &frame.tags, Some(Rc::clone(&frame.ancestry)));
                    stack.push(child_frame);
                }
                BlockItem::Task(task) if task.is_control() => {
                    trace!("Skipping control task '{}'", task.name());
                }
                BlockItem::Task(task) => {
                    let effective = tags::union(&frame.tags, &task.tags);
                    self.aggregator.observe(&effective);
                    listed.push(ListedTask {
                        ancestry: Rc::clone(&frame.ancestry),
                        task,
                        tags: effective,
                    });
                }
            }
        }

        listed
    }

    /// Finish the traversal, keeping the aggregated tags.
    pub fn into_aggregator(self) -> TagAggregator {
        self.aggregator
    }
}

/// List every non-control task of `blocks` in order, with the play's tag
/// aggregate.
pub fn traverse<'a>(blocks: &'a [Block], play_tags: &TagSet) -> (Vec<ListedTask<'a>>, TagAggregator) {
    let mut traversal = BlockTraversal::new(play_tags);
    let listed = blocks
        .iter()
        .flat_map(|block| traversal.visit(block))
        .collect();
    (listed, traversal.into_aggregator())
}
