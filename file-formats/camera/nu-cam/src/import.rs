//! Full import session: locator rig, animated track and reference placement
//!
//! The rig built in the scene is
//!
//! ```text
//! <group>
//! ├── world          static placement of the reference actor
//! │   └── world_offset
//! └── anim           animated camera track
//!     └── anim_offset
//! ```
//!
//! Everything that can fail on the input (track lookup, reconstruction,
//! reference lookup) is resolved before the first scene call.

use crate::apply::{AnimationApplier, FrameClock};
use crate::document::{Actor, DEFAULT_TRACK, ExportDocument};
use crate::error::Result;
use crate::matrix::AffineMatrix;
use crate::scene::SceneGraph;
use crate::track::{ConversionOptions, ReconstructedTrack, TrackReconstructor};
use serde::{Deserialize, Serialize};

/// Default scene time of the first frame
pub const DEFAULT_START_TIME: f64 = 1001.0;

/// Default time between frames
pub const DEFAULT_STEP: f64 = 4.0;

/// Default name of the rig's top node
pub const DEFAULT_GROUP_NAME: &str = "nucam";

/// User-facing import options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    pub start_time: f64,
    pub step: f64,
    pub track: String,
    pub group_name: String,
    /// Reference actor id (`"Actor007"` or `"Actor 7"`) placed on the `world` node
    pub reference_actor: Option<String>,
    pub conversion: ConversionOptions,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            start_time: DEFAULT_START_TIME,
            step: DEFAULT_STEP,
            track: DEFAULT_TRACK.to_string(),
            group_name: DEFAULT_GROUP_NAME.to_string(),
            reference_actor: None,
            conversion: ConversionOptions::default(),
        }
    }
}

impl ImportSettings {
    pub fn clock(&self) -> FrameClock {
        FrameClock::new(self.start_time, self.step)
    }
}

/// Nodes created for one import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorRig<N> {
    pub group: N,
    pub world: N,
    pub world_offset: N,
    pub anim: N,
    pub anim_offset: N,
}

impl<N: Clone + std::fmt::Debug> LocatorRig<N> {
    /// Create the rig hierarchy under a new top-level group
    pub fn create<S: SceneGraph<Node = N>>(scene: &mut S, group_name: &str) -> Result<Self> {
        let group = scene.create_locator(None, group_name)?;
        let world = scene.create_locator(Some(&group), "world")?;
        let world_offset = scene.create_locator(Some(&world), "world_offset")?;
        let anim = scene.create_locator(Some(&group), "anim")?;
        let anim_offset = scene.create_locator(Some(&anim), "anim_offset")?;
        log::debug!("Created locator rig '{group_name}'");
        Ok(Self {
            group,
            world,
            world_offset,
            anim,
            anim_offset,
        })
    }
}

/// Outcome of [`Importer::run`]
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport<N> {
    pub rig: LocatorRig<N>,
    pub frames_emitted: usize,
    /// Playback range the host should apply
    pub start_time: f64,
    pub end_time: f64,
    /// Smallest and largest source frame index
    pub frame_range: Option<(u32, u32)>,
    /// Id and world matrix of the placed reference actor
    pub reference: Option<(String, AffineMatrix)>,
}

/// Validated input of an import, ready to be written to a scene
#[derive(Debug, Clone)]
pub struct ImportPlan<'a> {
    pub track: ReconstructedTrack,
    pub reference: Option<(String, &'a Actor)>,
}

/// Runs an import of one document with fixed settings
#[derive(Debug, Clone)]
pub struct Importer<'a> {
    document: &'a ExportDocument,
    settings: ImportSettings,
    applier: AnimationApplier,
}

impl<'a> Importer<'a> {
    pub fn new(document: &'a ExportDocument, settings: ImportSettings) -> Self {
        Self {
            document,
            settings,
            applier: AnimationApplier::default(),
        }
    }

    /// Use a non-default applier (basis scale, composition order)
    pub fn with_applier(mut self, applier: AnimationApplier) -> Self {
        self.applier = applier;
        self
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// Resolve and validate all inputs without touching a scene
    pub fn plan(&self) -> Result<ImportPlan<'a>> {
        let data = self.document.track(&self.settings.track)?;
        let track = TrackReconstructor::new(self.settings.conversion).reconstruct(data)?;

        let reference = match &self.settings.reference_actor {
            Some(id) => {
                let actor = self.document.reference_actor(id)?;
                Some((id.clone(), actor))
            }
            None => None,
        };

        Ok(ImportPlan { track, reference })
    }

    /// Build the rig, animate `anim` and place `world`
    pub fn run<S: SceneGraph>(&self, scene: &mut S) -> Result<ImportReport<S::Node>> {
        let plan = self.plan()?;
        let clock = self.settings.clock();

        let rig = LocatorRig::create(scene, &self.settings.group_name)?;
        let summary = self
            .applier
            .apply(scene, &rig.anim, &plan.track.frames, &plan.track.baseline, clock)?;

        let reference = match plan.reference {
            Some((id, actor)) => {
                let matrix = self
                    .applier
                    .place(scene, &rig.world, &actor.transform, clock.start)?;
                Some((id, matrix))
            }
            None => None,
        };

        log::debug!(
            "Imported track '{}': {} frame(s), playback {}..{}",
            self.settings.track,
            summary.frames_emitted,
            summary.start_time,
            summary.end_time
        );

        Ok(ImportReport {
            rig,
            frames_emitted: summary.frames_emitted,
            start_time: summary.start_time,
            end_time: summary.end_time,
            frame_range: plan.track.frame_range,
            reference,
        })
    }
}
