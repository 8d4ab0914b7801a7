//! Domain entities: repositories, branch snapshots, configurations and batch results

pub mod entities;
