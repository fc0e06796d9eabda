//! The structures the CLI can build, behind one enum.

use anyhow::Result;
use clap::ValueEnum;
use dataviz_config::StructureKind;
use dataviz_containers::{JsonDeserializer, JsonSerializer, Tree, Visualizer};
use dataviz_maps::TreeMap;
use dataviz_trees::{AvlTree, BinaryHeap, RedBlackTree};

/// How the finished structure is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Header line plus the structure's text rendering
    Ascii,
    /// Graphviz dot source
    Dot,
    /// Numbered nodes followed by `parent -> child` lines
    Edges,
    Json,
}

/// Integer keys with string values; the heap keeps keys only.
pub enum Structure {
    Avl(AvlTree<i64, String>),
    RedBlack(RedBlackTree<i64, String>),
    TreeMap(TreeMap<i64, String>),
    Heap(BinaryHeap<i64>),
}

impl Structure {
    pub fn new(kind: StructureKind) -> Self {
        match kind {
            StructureKind::Avl => Structure::Avl(AvlTree::new()),
            StructureKind::RedBlack => Structure::RedBlack(RedBlackTree::new()),
            StructureKind::TreeMap => Structure::TreeMap(TreeMap::new()),
            StructureKind::Heap => Structure::Heap(BinaryHeap::new()),
        }
    }

    pub fn kind(&self) -> StructureKind {
        match self {
            Structure::Avl(_) => StructureKind::Avl,
            Structure::RedBlack(_) => StructureKind::RedBlack,
            Structure::TreeMap(_) => StructureKind::TreeMap,
            Structure::Heap(_) => StructureKind::Heap,
        }
    }

    /// Inserts or overwrites `key`, returning the replaced value.
    pub fn put(&mut self, key: i64, value: String) -> Option<String> {
        match self {
            Structure::Avl(tree) => tree.put(key, value),
            Structure::RedBlack(tree) => tree.put(key, value),
            Structure::TreeMap(map) => map.put(key, value),
            Structure::Heap(heap) => {
                heap.push(key);
                None
            }
        }
    }

    /// Removes `key` (one occurrence of it for the heap). Returns whether
    /// anything was removed.
    pub fn remove(&mut self, key: i64) -> bool {
        match self {
            Structure::Avl(tree) => tree.remove(&key).is_some(),
            Structure::RedBlack(tree) => tree.remove(&key).is_some(),
            Structure::TreeMap(map) => map.remove(&key).is_some(),
            Structure::Heap(heap) => {
                let mut items: Vec<i64> = heap.iter().copied().collect();
                let Some(pos) = items.iter().position(|k| *k == key) else {
                    return false;
                };
                items.swap_remove(pos);
                *heap = BinaryHeap::from_vec(items);
                true
            }
        }
    }

    /// Replaces the contents with a JSON object (trees, map) or array (heap).
    pub fn load_json(&mut self, data: &str) -> Result<()> {
        match self {
            Structure::Avl(tree) => tree.from_json(data),
            Structure::RedBlack(tree) => tree.from_json(data),
            Structure::TreeMap(map) => map.from_json(data),
            Structure::Heap(heap) => heap.from_json(data),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Structure::Avl(tree) => tree.len(),
            Structure::RedBlack(tree) => tree.len(),
            Structure::TreeMap(map) => map.len(),
            Structure::Heap(heap) => heap.len(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Structure::Avl(tree) => Tree::height(tree),
            Structure::RedBlack(tree) => Tree::height(tree),
            Structure::TreeMap(map) => Tree::height(map.tree()),
            Structure::Heap(heap) => Tree::height(heap),
        }
    }

    pub fn visualizer(&self) -> &dyn Visualizer {
        match self {
            Structure::Avl(tree) => tree,
            Structure::RedBlack(tree) => tree,
            Structure::TreeMap(map) => map,
            Structure::Heap(heap) => heap,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        Ok(match format {
            OutputFormat::Ascii => match self {
                Structure::Avl(tree) => tree.to_string(),
                Structure::RedBlack(tree) => tree.to_string(),
                Structure::TreeMap(map) => map.to_string(),
                Structure::Heap(heap) => heap.to_string(),
            },
            OutputFormat::Dot => self.visualizer().dot_graph().to_dot(),
            OutputFormat::Edges => self.visualizer().dot_graph().edge_list(),
            OutputFormat::Json => match self {
                Structure::Avl(tree) => tree.to_json()?,
                Structure::RedBlack(tree) => tree.to_json()?,
                Structure::TreeMap(map) => map.to_json()?,
                Structure::Heap(heap) => heap.to_json()?,
            },
        })
    }
}
