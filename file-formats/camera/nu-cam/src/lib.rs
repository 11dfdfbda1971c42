//! Conversion of per-frame camera and actor exports into scene animation
//!
//! An export stores translation, Euler rotation (degrees) and scale per frame
//! in a string-keyed map. This crate reconstructs the ordered track, composes
//! each sample into an affine matrix, moves it into the target scene's axis
//! convention and keys it through a [`SceneGraph`] implementation.
//!
//! # Examples
//!
//! ```rust
//! use nu_cam::{ExportDocument, ImportSettings, Importer, RecordingScene};
//!
//! let document = ExportDocument::from_json(r#"{
//!     "Animation": {"Track 0": {"FrameData": {
//!         "Frame 1": {"FrameTransform": "0,0,0|0,0,0|1,1,1"},
//!         "Frame 2": {"FrameTransform": "10,0,0|0,90,0|1,1,1"}
//!     }}}
//! }"#).unwrap();
//!
//! let mut scene = RecordingScene::new();
//! let report = Importer::new(&document, ImportSettings::default())
//!     .run(&mut scene)
//!     .unwrap();
//! assert_eq!(report.frames_emitted, 2);
//! assert_eq!(report.end_time, 1009.0);
//! ```

pub mod apply;
pub mod basis;
pub mod compose;
pub mod decompose;
pub mod document;
pub mod error;
pub mod import;
pub mod matrix;
pub mod order;
pub mod scene;
pub mod track;
pub mod transform;

// Re-export common types
pub use apply::{AnimationApplier, ApplySummary, FrameClock};
pub use basis::BasisConverter;
pub use compose::TransformComposer;
pub use decompose::MatrixDecomposer;
pub use document::{Actor, ExportDocument, RejectedActor, TrackData};
pub use error::{DecompositionError, NuCamError, Result};
pub use import::{ImportReport, ImportSettings, Importer, LocatorRig};
pub use matrix::AffineMatrix;
pub use order::{ChannelOrder, RotationOrder};
pub use scene::{Channel, NodeId, RecordingScene, SceneGraph, TRANSFORM_CHANNELS};
pub use track::{AnimationTrack, ConversionOptions, ReconstructedTrack, TrackReconstructor};
pub use transform::{EulerAngles, TransformRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
