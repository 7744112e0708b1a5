//! # Replica Math
//!
//! Numerical building blocks for the Replica index-tracking toolkit.
//!
//! - **Statistics**: Sample mean, standard deviation, covariance, Pearson
//!   correlation (backed by `statrs`)
//! - **Rolling**: Trailing-window versions of the above with `NaN` warm-up
//! - **Decomposition**: Column standardization and PCA (backed by `nalgebra`)
//!
//! ## Example
//!
//! ```rust
//! use replica_math::prelude::*;
//!
//! let corr = rolling_correlation(&[0.01, 0.02, 0.03], &[0.02, 0.04, 0.06], 2).unwrap();
//! assert!(corr[0].is_nan());
//! assert!((corr[2] - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]

pub mod decomposition;
pub mod error;
pub mod rolling;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::decomposition::{standardize, Pca};
    pub use crate::error::{MathError, MathResult};
    pub use crate::rolling::{
        last_valid, rolling_apply, rolling_apply_pair, rolling_correlation, rolling_mean,
        rolling_std,
    };
    pub use crate::statistics::{covariance, mean, pearson, std_dev, variance, Summary};
}

pub use error::{MathError, MathResult};
