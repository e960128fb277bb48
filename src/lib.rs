//! # Cachelayout - How Record Layout Drives Cache Behavior
//!
//! A small library built around one aggregation, "count active users per
//! country", and two layouts of the user record it runs over. The loop never
//! changes; only the bytes it has to drag through the cache do.
//!
//! ## The Problem
//!
//! Every user carries a 128×128 byte icon. Storing it inline as
//! `[u8; 16384]` looks harmless, but it makes each record ~16 KiB. The
//! aggregation reads two fields per record (`active` and `country`), yet the
//! CPU fetches whole cache lines and the hardware prefetcher streams through
//! the icons too. Walking 10,000 inline users touches about 160 MiB.
//!
//! ## The Solution: Keep Hot Fields Dense
//!
//! Moving the icon behind a `Vec<u8>` handle shrinks the record to a few
//! dozen bytes. Several users now fit in a cache line, the whole population
//! fits in L2, and the same loop runs orders of magnitude faster.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                 country_count over 10,000 users                             │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │                                                                             │
//! │  InlineUser (16 KiB/record)   ████████████████████████████████████████      │
//! │                                                                             │
//! │  HeapUser   (~80 B/record)    █                                             │
//! │                                                                             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Run `cargo bench` to reproduce on your machine; [`layout::LayoutReport`]
//! prints the sizes and cache lines behind the numbers.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`image`] | [`InlineImage`](image::InlineImage) and [`HeapImage`](image::HeapImage) icon layouts |
//! | [`user`] | [`User<I>`](user::User) record and the [`Activity`](user::Activity) view |
//! | [`count`] | [`country_count`](count::country_count) and [`CountMap`](count::CountMap) |
//! | [`generator`] | Synthetic populations for tests and benchmarks |
//! | [`layout`] | Size, alignment and scan footprint of each layout |
//!
//! ## Quick Start
//!
//! ```rust
//! use cachelayout::count::country_count;
//! use cachelayout::generator::{generate, GeneratorConfig};
//! use cachelayout::user::HeapUser;
//!
//! let users: Vec<HeapUser> = generate(&GeneratorConfig::default()).unwrap();
//! let counts = country_count(&users);
//!
//! assert_eq!(counts.get("AD"), 2000);
//! assert_eq!(counts.total(), 8000);
//! ```
//!
//! ## Observers
//!
//! Optional observer modules export results, each gated behind a feature flag:
//!
//! | Feature | Module | Description |
//! |---------|--------|-------------|
//! | `table` | [`observers::table`] | Pretty-print counts and layouts as tables |
//! | `json` | [`observers::json`] | Serialize counts and layouts to JSON |
//! | `serde` | [`snapshot`] | Serializable snapshots |
//! | `full` | All observers | Enables all observer modules |

pub mod count;
pub mod error;
pub mod generator;
pub mod image;
pub mod layout;
pub mod observers;
pub mod user;

#[cfg(feature = "serde")]
pub mod snapshot;

pub use count::{country_count, CountMap};
pub use error::LayoutError;
pub use image::{HeapImage, Image, InlineImage, LayoutKind, IMAGE_SIZE};
pub use user::{Activity, HeapUser, InlineUser, User};
