//! A collision-resistant, sortable unique ID generator in the style of [cuid].
//!
//! A cuid is 23 lowercase characters: a `c`, six base36 digits of timestamp,
//! four of counter, a four character host fingerprint and two blocks of four
//! random digits.
//!
//! ## Quickstart
//!
//! Add the following to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! cuid_me = "0.1"
//! ```
//!
//! Use the library like this:
//!
//! ```
//! let id = cuid_me::cuid().unwrap();
//! println!("{}", id);
//! ```
//!
//! ## Custom sources
//!
//! The timestamp, the random numbers and the fingerprint can be replaced
//! through the [`Builder`]:
//! ```
//! use cuid_me::{Fingerprint, Generator};
//!
//! let generator = Generator::builder()
//!     .timestamp(|| 123456789)
//!     .fingerprint(&|| Ok("fing".parse()?))
//!     .finalize()
//!     .unwrap();
//! assert!(generator.next_id().starts_with("c21i3v90001fing"));
//! ```
//!
//! ## Concurrent use
//!
//! Generator is thread safe. `clone` it before moving to another thread, the
//! clones share one counter:
//! ```
//! use cuid_me::Generator;
//! use std::thread;
//!
//! let generator = Generator::new().unwrap();
//!
//! let mut children = Vec::new();
//! for _ in 0..10 {
//!     let thread_generator = generator.clone();
//!     children.push(thread::spawn(move || {
//!         println!("{}", thread_generator.next_id());
//!     }));
//! }
//!
//! for child in children {
//!     child.join().unwrap();
//! }
//! ```
//!
//! ## Pure API
//!
//! [`Cuid`] exposes the generation steps as explicit transitions over an
//! owned value, with seedable and replayable random streams ([`Mwc`]).
//!
//! [cuid]: https://github.com/ericelliott/cuid
#![doc(html_root_url = "https://docs.rs/cuid_me/*")]

pub mod base36;
mod builder;
mod counter;
mod cuid;
mod error;
mod fingerprint;
mod generator;
pub mod mwc;
#[cfg(test)]
mod tests;

pub use crate::cuid::*;
pub use builder::*;
pub use counter::*;
pub use error::*;
pub use fingerprint::*;
pub use generator::*;
pub use mwc::Mwc;
