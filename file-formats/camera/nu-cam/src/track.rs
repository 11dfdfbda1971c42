//! Reconstruction of ordered animation tracks from the exporter's frame map
//!
//! Frames arrive as a string-keyed map (`"Frame 12" -> "tx,ty,tz|r1,r2,r3|sx,sy,sz"`)
//! with no reliable ordering and possibly with gaps. Reconstruction parses
//! every entry, applies the configured channel reordering, and returns the
//! records sorted by frame index. Any bad entry rejects the whole track.

use crate::document::TrackData;
use crate::error::{NuCamError, Result};
use crate::order::ChannelOrder;
use crate::transform::{EulerAngles, TransformRecord};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Prefix of every frame label
pub const FRAME_LABEL_PREFIX: &str = "Frame ";

/// Compatibility switches for older exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Compose the track's `OriginalTransform` into every frame
    pub legacy_offset: bool,
    /// Rotation triples were written in the older `[2, 0, 1]` channel layout
    pub legacy_rotation_axis_order: bool,
    /// Reindexing applied to translation triples (identity for all known exports)
    pub translation_order: ChannelOrder,
}

impl ConversionOptions {
    /// Channel order applied to rotation triples
    pub fn rotation_order(&self) -> ChannelOrder {
        if self.legacy_rotation_axis_order {
            ChannelOrder::LEGACY_ROTATION
        } else {
            ChannelOrder::IDENTITY
        }
    }
}

/// Dense, frame-ordered transform samples
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationTrack {
    records: Vec<TransformRecord>,
}

impl AnimationTrack {
    pub fn new(records: Vec<TransformRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TransformRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransformRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[TransformRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a AnimationTrack {
    type Item = &'a TransformRecord;
    type IntoIter = std::slice::Iter<'a, TransformRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A reconstructed track together with the baseline composed into each frame
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedTrack {
    /// Identity unless `legacy_offset` was requested
    pub baseline: TransformRecord,
    pub frames: AnimationTrack,
    /// Smallest and largest frame index seen, if any
    pub frame_range: Option<(u32, u32)>,
}

/// Turns raw [`TrackData`] into [`ReconstructedTrack`]s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackReconstructor {
    options: ConversionOptions,
}

impl TrackReconstructor {
    pub fn new(options: ConversionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Reconstruct a track and resolve its baseline
    pub fn reconstruct(&self, track: &TrackData) -> Result<ReconstructedTrack> {
        let baseline = self.baseline(track)?;
        let (frames, frame_range) = self.reconstruct_indexed(track.frames())?;
        Ok(ReconstructedTrack {
            baseline,
            frames,
            frame_range,
        })
    }

    /// Reconstruct frames from `(label, transform string)` pairs
    pub fn reconstruct_frames<'a>(
        &self,
        frames: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<AnimationTrack> {
        self.reconstruct_indexed(frames).map(|(track, _)| track)
    }

    /// The baseline composed into every frame
    ///
    /// Only populated when `legacy_offset` is set; an export without an
    /// `OriginalTransform` falls back to identity.
    pub fn baseline(&self, track: &TrackData) -> Result<TransformRecord> {
        if !self.options.legacy_offset {
            return Ok(TransformRecord::IDENTITY);
        }
        match &track.original_transform {
            Some(fields) => fields.to_record("OriginalTransform"),
            None => {
                log::warn!("Legacy offset requested but the track has no OriginalTransform; using identity");
                Ok(TransformRecord::IDENTITY)
            }
        }
    }

    fn reconstruct_indexed<'a>(
        &self,
        frames: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<(AnimationTrack, Option<(u32, u32)>)> {
        let rotation_order = self.options.rotation_order();
        let translation_order = self.options.translation_order;

        let mut by_index: BTreeMap<u32, (&str, TransformRecord)> = BTreeMap::new();
        for (label, transform) in frames {
            let index = parse_frame_label(label)?;
            let parsed = parse_frame_transform(label, transform)?;

            let record = TransformRecord::new(
                DVec3::from_array(translation_order.apply(parsed.translation.to_array())),
                EulerAngles::from_array(rotation_order.apply(parsed.rotation.to_array())),
                parsed.scale,
            );
            log::trace!("{label} -> index {index}: {record:?}");

            match by_index.entry(index) {
                Entry::Vacant(slot) => {
                    slot.insert((label, record));
                }
                Entry::Occupied(existing) => {
                    return Err(NuCamError::validation(
                        label,
                        format!(
                            "frame index {index} is also used by '{}'",
                            existing.get().0
                        ),
                    ));
                }
            }
        }

        let frame_range = by_index
            .keys()
            .next()
            .copied()
            .zip(by_index.keys().next_back().copied());
        let records: Vec<TransformRecord> =
            by_index.into_values().map(|(_, record)| record).collect();

        match frame_range {
            Some((first, last)) => log::debug!(
                "Reconstructed {} frame(s), indices {first}..={last}",
                records.len()
            ),
            None => log::debug!("Reconstructed an empty track"),
        }

        Ok((AnimationTrack::new(records), frame_range))
    }
}

/// Parse the frame index out of `"Frame <n>"`
pub fn parse_frame_label(label: &str) -> Result<u32> {
    let digits = label
        .strip_prefix(FRAME_LABEL_PREFIX)
        .ok_or_else(|| NuCamError::parse(label, format!("label does not start with '{FRAME_LABEL_PREFIX}'")))?;
    digits
        .trim()
        .parse::<u32>()
        .map_err(|e| NuCamError::parse(label, format!("'{digits}' is not a frame index: {e}")))
}

/// Parse `"tx,ty,tz|r1,r2,r3|sx,sy,sz"` without any reordering
///
/// `label` is only used for error context.
pub fn parse_frame_transform(label: &str, transform: &str) -> Result<TransformRecord> {
    let groups: Vec<&str> = transform.split('|').collect();
    if groups.len() != 3 {
        return Err(NuCamError::parse(
            label,
            format!("expected 3 '|'-separated groups, got {} in '{transform}'", groups.len()),
        ));
    }

    let mut values = Vec::with_capacity(9);
    for (group, name) in groups.iter().zip(["translation", "rotation", "scale"]) {
        let fields: Vec<&str> = group.split(',').collect();
        if fields.len() != 3 {
            return Err(NuCamError::parse(
                label,
                format!("{name} has {} values, expected 3: '{group}'", fields.len()),
            ));
        }
        for field in fields {
            let value = field.trim().parse::<f64>().map_err(|e| {
                NuCamError::parse(label, format!("{name} value '{field}' is not a number: {e}"))
            })?;
            if !value.is_finite() {
                return Err(NuCamError::parse(
                    label,
                    format!("{name} value '{field}' is not finite"),
                ));
            }
            values.push(value);
        }
    }

    let record = TransformRecord::from_channels(&values)?;
    record.validate(label)?;
    Ok(record)
}
