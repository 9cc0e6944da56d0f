// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Graphics math casts between pixel counts and floats are intentional
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Scroll-driven comet timeline rendered with wgpu.
//!
//! A comet travels along a smooth path from deep space to a rotating Earth.
//! The mouse wheel scrubs the timeline; a follower camera eases after the
//! comet and can be orbited by dragging. A small stage machine gates the
//! scene behind an intro card and a simulated loading bar.
//!
//! # Key entry points
//!
//! - [`experience::Experience`] - stage sequencing and the per-frame update
//! - [`timeline::Curve`] - the comet's path
//! - [`timeline::ProgressController`] - wheel input → smoothed progress
//! - [`camera::CameraRig`] - the follower camera
//! - [`options::Options`] - runtime configuration (TOML presets)
//!
//! # Architecture
//!
//! Input events are turned into [`experience::Command`]s by the
//! [`input::InputProcessor`] and applied as they arrive. Once per rendered
//! frame [`experience::Experience::update`] advances the loading task, then
//! the progress, then the camera, and returns a [`scene::FrameSnapshot`]
//! that the [`renderer::SceneRenderer`] draws.

pub mod camera;
pub mod error;
pub mod experience;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod stage;
pub mod timeline;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use error::LookupError;
pub use experience::{Command, Experience};
pub use input::{InputEvent, InputProcessor, KeyAction, MouseButton};
pub use options::Options;
pub use scene::FrameSnapshot;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
