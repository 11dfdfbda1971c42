//! Emission of reconstructed tracks into a scene
//!
//! Each animated frame becomes
//!
//! ```text
//! pre * compose(frame) * compose(baseline) * post
//! ```
//!
//! and a static placement is `pre * compose(record) * post`. Frames are
//! emitted strictly in track order, one sample per clock tick, with no
//! interpolation between them.

use crate::basis::BasisConverter;
use crate::compose::TransformComposer;
use crate::error::{NuCamError, Result};
use crate::matrix::AffineMatrix;
use crate::scene::{SceneGraph, TRANSFORM_CHANNELS};
use crate::track::AnimationTrack;
use crate::transform::TransformRecord;
use serde::{Deserialize, Serialize};

/// Scene time of the first frame and the spacing between frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    pub start: f64,
    pub step: f64,
}

impl FrameClock {
    pub fn new(start: f64, step: f64) -> Self {
        Self { start, step }
    }

    /// Time of the `index`-th emitted frame
    pub fn time_at(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }
}

/// What [`AnimationApplier::apply`] emitted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplySummary {
    pub frames_emitted: usize,
    pub start_time: f64,
    /// Clock position after the last frame (`start + frames * step`)
    pub end_time: f64,
}

/// Builds final world matrices and drives a [`SceneGraph`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationApplier {
    basis: BasisConverter,
    composer: TransformComposer,
}

impl AnimationApplier {
    pub fn new(basis: BasisConverter, composer: TransformComposer) -> Self {
        Self { basis, composer }
    }

    pub fn basis(&self) -> &BasisConverter {
        &self.basis
    }

    /// Final matrix of one animated frame
    pub fn frame_matrix(&self, frame: &TransformRecord, baseline: &TransformRecord) -> AffineMatrix {
        self.basis.pre()
            * self.composer.compose(frame)
            * self.composer.compose(baseline)
            * self.basis.post()
    }

    /// Final matrix of a static placement
    pub fn static_matrix(&self, record: &TransformRecord) -> AffineMatrix {
        self.basis.convert(&self.composer.compose(record))
    }

    /// Final matrices of every frame, in track order
    pub fn world_matrices(&self, track: &AnimationTrack, baseline: &TransformRecord) -> Vec<AffineMatrix> {
        let baseline = self.composer.compose(baseline);
        let pre = self.basis.pre();
        let post = self.basis.post();
        track
            .iter()
            .map(|frame| pre * self.composer.compose(frame) * baseline * post)
            .collect()
    }

    /// Place and key every frame of `track` on `node`
    ///
    /// Stops at the first collaborator failure; frames emitted before it stay
    /// in the scene.
    pub fn apply<S: SceneGraph>(
        &self,
        scene: &mut S,
        node: &S::Node,
        track: &AnimationTrack,
        baseline: &TransformRecord,
        clock: FrameClock,
    ) -> Result<ApplySummary> {
        let matrices = self.world_matrices(track, baseline);

        for (frame, matrix) in matrices.iter().enumerate() {
            let time = clock.time_at(frame);
            log::trace!("Emitting frame {frame} at {time}");
            emit(scene, node, matrix, time).map_err(|source| NuCamError::FrameEmission {
                frame,
                time,
                source: Box::new(source),
            })?;
        }

        let summary = ApplySummary {
            frames_emitted: matrices.len(),
            start_time: clock.start,
            end_time: clock.time_at(matrices.len()),
        };
        log::debug!(
            "Applied {} frame(s) to {node:?}, time {}..{}",
            summary.frames_emitted,
            summary.start_time,
            summary.end_time
        );
        Ok(summary)
    }

    /// Place `node` once with a static record and key it at `time`
    pub fn place<S: SceneGraph>(
        &self,
        scene: &mut S,
        node: &S::Node,
        record: &TransformRecord,
        time: f64,
    ) -> Result<AffineMatrix> {
        let matrix = self.static_matrix(record);
        emit(scene, node, &matrix, time)?;
        log::debug!("Placed {node:?} at time {time}");
        Ok(matrix)
    }
}

fn emit<S: SceneGraph>(scene: &mut S, node: &S::Node, matrix: &AffineMatrix, time: f64) -> Result<()> {
    scene.set_world_transform(node, matrix, time)?;
    scene.insert_keyframe(node, &TRANSFORM_CHANNELS, time)
}
