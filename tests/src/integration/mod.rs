//! Cross-role exchange flows.

pub mod flows;
