//! Context block collection.
//!
//! Blocks have no identity beyond their position: the index a block sits at
//! when the request is built is its index in `jsonInput`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::surface::TextSurface;

/// Where `add_block` puts a new block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockPlacement {
    /// After the last block; creation order is submission order.
    #[default]
    Append,
    /// Directly under the panel header, ahead of every existing block.
    AfterAnchor,
}

impl BlockPlacement {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockPlacement::Append => "append",
            BlockPlacement::AfterAnchor => "after-anchor",
        }
    }
}

/// One data-context document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextBlock {
    pub surface: TextSurface,
}

impl ContextBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        self.surface.text()
    }
}

/// Ordered, resizable collection of context blocks in visual order.
#[derive(Debug, Clone, Default)]
pub struct ContextCollection {
    blocks: Vec<ContextBlock>,
    placement: BlockPlacement,
}

impl ContextCollection {
    pub fn new(placement: BlockPlacement) -> Self {
        Self {
            blocks: Vec::new(),
            placement,
        }
    }

    /// Build a collection holding `texts` in the given order.
    pub fn with_texts<I, S>(placement: BlockPlacement, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            blocks: texts
                .into_iter()
                .map(|t| ContextBlock {
                    surface: TextSurface::from_text(t),
                })
                .collect(),
            placement,
        }
    }

    /// Add an empty block; returns its index.
    pub fn add_block(&mut self) -> usize {
        let index = match self.placement {
            BlockPlacement::Append => self.blocks.len(),
            BlockPlacement::AfterAnchor => 0,
        };
        self.blocks.insert(index, ContextBlock::new());
        debug!(index, count = self.blocks.len(), "context block added");
        index
    }

    /// Remove the block at `index`. Out-of-range indexes change nothing.
    pub fn delete_block(&mut self, index: usize) -> Option<ContextBlock> {
        if index >= self.blocks.len() {
            return None;
        }
        let removed = self.blocks.remove(index);
        debug!(index, count = self.blocks.len(), "context block deleted");
        Some(removed)
    }

    /// Current block texts in visual order.
    pub fn enumerate(&self) -> Vec<String> {
        self.blocks.iter().map(|b| b.text().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ContextBlock> {
        self.blocks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ContextBlock> {
        self.blocks.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContextBlock> {
        self.blocks.iter()
    }
}
