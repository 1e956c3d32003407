pub mod diff;
pub mod node;

pub use diff::{apply, diff, Patch};
pub use node::{render_html, Element, Node};
