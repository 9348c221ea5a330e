mod common;
mod leverage;
mod narrative;
