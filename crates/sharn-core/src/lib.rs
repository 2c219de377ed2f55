//! # Sharn Core
//!
//! District resolution and rendering for an interactive map of Sharn.
//!
//! A click on a map region (or a `#district` permalink) produces a district
//! identifier. The identifier's first letter decides its ward and whether the
//! district has upper, middle and lower levels; the matching records are read
//! from the description dataset, their markdown is rendered to sanitized HTML,
//! and the result is painted into the info panel.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sharn_core::prelude::*;
//!
//! let mut session = MapSession::new();
//! session.load_from_text("districtInfo.json", &json, &mut view);
//! session.click("C3", &mut view)?;
//! println!("{}", session.panel().to_html());
//! ```
//!
//! ## Dataset format
//!
//! A JSON object keyed by ward key (`central`, `menthis`, `tavicks`,
//! `northedge`, `dura`, `cliffside`) or district identifier. Districts whose
//! identifier starts with `C`, `M`, `T`, `N` or `D` hold `upper`, `middle` and
//! `lower` levels; all others are single-level cliffside districts.

pub mod fetch;
pub mod location;
pub mod model;
pub mod render;
pub mod resolve;
pub mod sanitize;
pub mod scaffold;
pub mod selection;
pub mod session;
pub mod store;
pub mod validate;
pub mod ward;

mod error;

pub use error::{Error, ErrorKind, Result};

/// Prelude module for convenient imports
pub mod prelude {
    // Data model
    pub use crate::model::{Dataset, DistrictEntry, LevelEntry, LocationsDict, WardEntry};
    pub use crate::ward::{Direction, Level, Ward};

    // Pipeline
    pub use crate::render::{InfoPanel, Renderer};
    pub use crate::resolve::{ResolvedView, resolve};
    pub use crate::sanitize::{MarkdownSanitizer, TextRenderer, to_safe_html};

    // State
    pub use crate::location::{PageLocation, Permalink};
    pub use crate::selection::{MapView, Selection, SelectionController, Transition};
    pub use crate::session::{LoadReport, MapSession};
    pub use crate::store::{DEFAULT_DATASET, DatasetSource, DescriptionStore};

    // Loading
    pub use crate::fetch::Fetch;
    #[cfg(feature = "http")]
    pub use crate::fetch::SourceFetcher;

    // Error handling
    pub use crate::{Error, ErrorKind, Result};
}
