//! Testing utilities for export code.
//!
//! - **Fixtures**: sample customer and order records, with null placeholders
//!   in the places a real export query produces them
//! - **Mock I/O**: temporary files and JSON Lines inputs for source tests
//!
//! ```
//! use woo_export::testing::sample_customer_records;
//! use woo_export::CsvWriter;
//!
//! let text = CsvWriter::new().render_to_string(&sample_customer_records()).unwrap();
//! assert!(text.starts_with("Email;First name;Last name\n"));
//! ```

pub mod fixtures;
pub mod mock_io;

pub use fixtures::*;
pub use mock_io::*;
