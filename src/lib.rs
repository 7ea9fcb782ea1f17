//! An AVL tree of unique integer keys, plus the renderers and the
//! interactive menu built on top of it.
//!
//! ```
//! use avl_explorer::{render, Tree};
//!
//! let tree: Tree = [50, 30, 20, 10].into_iter().collect();
//! assert_eq!(tree.root().map(|root| root.key()), Some(30));
//! assert!(tree.contains(10));
//! print!("{}", render::text(&tree));
//! ```

mod tree;
pub use tree::{NodeRef, Order, Tree, Visit};

pub mod cli;
pub mod export;
pub mod render;
