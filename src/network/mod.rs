mod graph;
mod load;
mod parse;

pub use graph::{Author, CollabNetwork};
pub use load::load_network;
