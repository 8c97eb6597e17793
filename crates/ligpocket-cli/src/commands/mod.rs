pub mod extract;
pub mod ligands;
