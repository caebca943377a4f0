//! # Credex Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Holder and issuer driving a full exchange
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p credex-tests
//! cargo test -p credex-tests integration::
//! ```

pub mod integration;
