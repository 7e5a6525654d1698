//! Interactive mode.
//!
//! Started when `pdfvol` runs without arguments. The session lists the
//! folder, offers a numbered menu and turns each answer into a
//! [`MergeConfig`](crate::config::MergeConfig) before running it.
//!
//! Both pieces are generic over their streams so they can be driven from
//! memory:
//!
//! ```
//! use std::io::Cursor;
//! use pdfvol::interactive::Prompter;
//!
//! let mut prompter = Prompter::new(Cursor::new("y\n"), Vec::new());
//! assert!(prompter.confirm("Proceed? ").unwrap());
//! ```

pub mod prompt;
pub mod session;

pub use prompt::Prompter;
pub use session::{MenuChoice, Session};
