//! Core building blocks for tabstat
//!
//! - [`data`]: cell values, column-major tables, frequency tables,
//!   schema inference, row filters and axis transforms
//! - [`linalg`]: dense matrix helpers, LU decomposition with partial
//!   pivoting and matrix inversion
//! - [`distributions`]: log-gamma, beta, regularized incomplete beta,
//!   normal and Student-t CDFs
//!
//! Everything here is pure and synchronous; no operation performs I/O.

pub mod data;
pub mod distributions;
pub mod error;
pub mod linalg;

pub use error::{CoreError, Result};
