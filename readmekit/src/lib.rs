//! readmekit - compose a README from independently editable sections
//!
//! The core is an ordered [`SectionCollection`] with an active-selection
//! pointer, a read-only [`Catalog`] of section templates, the
//! [`available`] projection of templates that can still be added and the
//! [`compose`] step that produces the final markdown. Front ends drive a
//! [`Session`] with [`Operation`]s and hand the composed document to
//! [`export::write_document`].

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod availability;
pub mod catalog;
pub mod collection;
pub mod composer;
pub mod config;
pub mod export;
pub mod ids;
pub mod section;
pub mod session;
pub mod shell;

pub use availability::available;
pub use catalog::{Catalog, CatalogError, SectionTemplate};
pub use collection::{Placement, SectionCollection};
pub use composer::{compose, split_markdown, SEPARATOR};
pub use ids::{ClockIds, IdMinter, SequentialIds};
pub use section::Section;
pub use session::{Operation, Plan, PlanError, Session};
