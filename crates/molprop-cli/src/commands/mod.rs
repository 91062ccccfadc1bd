pub mod boiling_point;
pub mod monomers;
pub mod sweep;
pub mod tg;
