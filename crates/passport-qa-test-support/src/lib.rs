//! Test support utilities for passport-qa.
//!
//! Provides mocks, synthetic portrait builders, and utilities for testing
//! the validation pipeline.
//!
//! # Example
//!
//! ```
//! use passport_qa_test_support::{MockImageSource, PassportPhotoBuilder};
//!
//! // A compliant portrait and one at the wrong size
//! let good = PassportPhotoBuilder::compliant();
//! let small = PassportPhotoBuilder::wrong_size();
//!
//! // Create mock image source
//! let source = MockImageSource::new(vec![good.info, small.info]);
//! ```

mod builders;
mod mocks;

pub use builders::{PassportPhotoBuilder, SyntheticImageBuilder, SyntheticPhoto};
pub use mocks::{MockImageSource, MockLandmarkDetector, MockProgressSink, MockReportOutput};
