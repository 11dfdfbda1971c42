//! JSON export document model
//!
//! The exporter writes one object whose `"Animation"` key maps track names to
//! per-frame transforms, and whose `"Actor <n>"` keys describe scene actors.
//!
//! ```json
//! {
//!   "Animation": {
//!     "Track 0": {
//!       "OriginalTransform": { "Location": {...}, "Rotation": {...}, "Scale": {...} },
//!       "FrameData": { "Frame 1": { "FrameTransform": "0,0,0|0,0,0|1,1,1" } }
//!     }
//!   },
//!   "Actor 3": { "Type": "AtomView", "AVName": "Stage", "Transform": {...} }
//! }
//! ```
//!
//! Numeric transform fields may be written either as JSON numbers or as
//! numeric strings.

use crate::error::{NuCamError, Result};
use crate::transform::{EulerAngles, TransformRecord};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Key holding the animation tracks
pub const ANIMATION_KEY: &str = "Animation";

/// Prefix of actor keys
pub const ACTOR_PREFIX: &str = "Actor";

/// Track read when no other is requested
pub const DEFAULT_TRACK: &str = "Track 0";

/// A number that the exporter may have written as a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Numeric value, parsing text if needed; NaN and infinities are rejected
    pub fn value(&self, context: &str) -> Result<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse::<f64>().map_err(|e| {
                NuCamError::parse(context, format!("'{text}' is not a number: {e}"))
            })?,
        };
        if !value.is_finite() {
            return Err(NuCamError::parse(context, format!("'{value}' is not a finite number")));
        }
        Ok(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Location or scale block (`locationX`, `locationY`, `locationZ`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorFields {
    #[serde(rename = "locationX")]
    pub x: Scalar,
    #[serde(rename = "locationY")]
    pub y: Scalar,
    #[serde(rename = "locationZ")]
    pub z: Scalar,
}

impl VectorFields {
    fn to_vec3(&self, context: &str) -> Result<DVec3> {
        Ok(DVec3::new(
            self.x.value(context)?,
            self.y.value(context)?,
            self.z.value(context)?,
        ))
    }
}

/// Rotation block in degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationFields {
    pub roll: Scalar,
    pub pitch: Scalar,
    pub yaw: Scalar,
}

/// A full transform block as written for actors and track baselines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformFields {
    #[serde(rename = "Location")]
    pub location: VectorFields,
    #[serde(rename = "Rotation")]
    pub rotation: RotationFields,
    #[serde(rename = "Scale")]
    pub scale: VectorFields,
}

impl TransformFields {
    /// Convert to a record; rotation channels stay in roll, pitch, yaw order
    pub fn to_record(&self, context: &str) -> Result<TransformRecord> {
        let rotation = EulerAngles::new(
            self.rotation.roll.value(context)?,
            self.rotation.pitch.value(context)?,
            self.rotation.yaw.value(context)?,
        );
        let record = TransformRecord::new(
            self.location.to_vec3(context)?,
            rotation,
            self.scale.to_vec3(context)?,
        );
        record.validate(context)?;
        Ok(record)
    }
}

/// One entry of `FrameData`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameEntry {
    /// `"tx,ty,tz|r1,r2,r3|sx,sy,sz"`
    #[serde(rename = "FrameTransform")]
    pub frame_transform: String,
}

/// One animation track: an optional baseline and the sparse frame map
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackData {
    #[serde(rename = "OriginalTransform", default, skip_serializing_if = "Option::is_none")]
    pub original_transform: Option<TransformFields>,
    #[serde(rename = "FrameData", default)]
    pub frame_data: BTreeMap<String, FrameEntry>,
}

impl TrackData {
    /// Build a track from `(label, transform string)` pairs
    pub fn from_frames<'a>(frames: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            original_transform: None,
            frame_data: frames
                .into_iter()
                .map(|(label, transform)| {
                    (
                        label.to_string(),
                        FrameEntry {
                            frame_transform: transform.to_string(),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Frame labels paired with their raw transform strings
    pub fn frames(&self) -> impl Iterator<Item = (&str, &str)> {
        self.frame_data
            .iter()
            .map(|(label, entry)| (label.as_str(), entry.frame_transform.as_str()))
    }
}

/// Actor categories the importer cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Camera,
    AtomView,
    Other,
}

impl ActorKind {
    fn from_type(name: &str) -> Self {
        match name {
            "Camera" => Self::Camera,
            "AtomView" => Self::AtomView,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawActor {
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "AVName", default)]
    display_name: Option<String>,
    #[serde(rename = "Transform", default)]
    transform: Option<TransformFields>,
}

/// A scene actor with a static transform
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Key as written in the document, e.g. `"Actor 7"`
    pub key: String,
    /// Display name shown by the exporter, if any
    pub display_name: Option<String>,
    pub transform: TransformRecord,
}

/// A reference actor entry that could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedActor {
    pub key: String,
    pub reason: String,
}

/// A parsed export document
#[derive(Debug, Clone, Default)]
pub struct ExportDocument {
    /// Animation tracks by name
    pub tracks: BTreeMap<String, TrackData>,
    /// The static camera actor, if the export contains one
    pub camera: Option<Actor>,
    /// Reference actors keyed by normalized id (`"Actor007"`)
    pub reference_actors: BTreeMap<String, Actor>,
    /// Actor entries that failed to parse, keyed by normalized id
    ///
    /// They only become an error when selected as the reference actor.
    pub rejected_actors: BTreeMap<String, RejectedActor>,
}

impl ExportDocument {
    /// Parse a document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json)?;
        Self::from_value(root)
    }

    /// Parse a document from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let root: Value = serde_json::from_reader(reader)?;
        Self::from_value(root)
    }

    /// Load a document from a file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Classify the top-level keys of an already parsed JSON value
    pub fn from_value(root: Value) -> Result<Self> {
        let Value::Object(root) = root else {
            return Err(NuCamError::parse("document", "top level is not an object"));
        };

        let mut document = Self::default();
        for (key, value) in root {
            if key == ANIMATION_KEY {
                document.tracks = serde_json::from_value(value).map_err(|e| {
                    NuCamError::parse(ANIMATION_KEY, format!("invalid track data: {e}"))
                })?;
            } else if key.starts_with(ACTOR_PREFIX) {
                document.add_actor(key, value);
            } else {
                log::debug!("Ignoring top-level key '{key}'");
            }
        }

        log::debug!(
            "Parsed export document: {} track(s), camera: {}, {} reference actor(s)",
            document.tracks.len(),
            document.camera.is_some(),
            document.reference_actors.len()
        );
        Ok(document)
    }

    fn add_actor(&mut self, key: String, value: Value) {
        let raw: RawActor = match serde_json::from_value(value) {
            Ok(raw) => raw,
            Err(e) => {
                self.reject_actor(key, format!("invalid actor: {e}"));
                return;
            }
        };

        let kind = ActorKind::from_type(&raw.kind);
        if kind == ActorKind::Other {
            log::debug!("Skipping actor '{key}' of type '{}'", raw.kind);
            return;
        }

        let transform = match raw.transform.as_ref().map(|fields| fields.to_record(&key)) {
            Some(Ok(transform)) => transform,
            Some(Err(e)) => {
                self.reject(kind, key, e.to_string());
                return;
            }
            None => {
                self.reject(kind, key, "actor has no Transform".to_string());
                return;
            }
        };

        let actor = Actor {
            key,
            display_name: raw.display_name,
            transform,
        };
        match kind {
            ActorKind::Camera => {
                if let Some(previous) = &self.camera {
                    log::warn!("Camera actor '{}' replaces '{}'", actor.key, previous.key);
                }
                self.camera = Some(actor);
            }
            ActorKind::AtomView => {
                let id = match normalize_actor_key(&actor.key) {
                    Ok(id) => id,
                    Err(e) => {
                        log::warn!("Skipping actor '{}': {e}", actor.key);
                        return;
                    }
                };
                self.warn_on_collision(&id, &actor.key);
                self.rejected_actors.remove(&id);
                self.reference_actors.insert(id, actor);
            }
            ActorKind::Other => {}
        }
    }

    fn reject(&mut self, kind: ActorKind, key: String, reason: String) {
        if kind == ActorKind::Camera {
            log::warn!("Ignoring camera actor '{key}': {reason}");
        } else {
            self.reject_actor(key, reason);
        }
    }

    fn reject_actor(&mut self, key: String, reason: String) {
        log::warn!("Actor '{key}' cannot be used: {reason}");
        let Ok(id) = normalize_actor_key(&key) else {
            return;
        };
        self.warn_on_collision(&id, &key);
        self.reference_actors.remove(&id);
        self.rejected_actors.insert(id, RejectedActor { key, reason });
    }

    fn warn_on_collision(&self, id: &str, key: &str) {
        let previous = self
            .reference_actors
            .get(id)
            .map(|actor| actor.key.as_str())
            .or_else(|| self.rejected_actors.get(id).map(|rejected| rejected.key.as_str()));
        if let Some(previous) = previous {
            log::warn!("Actor '{key}' replaces '{previous}'; both map to {id}");
        }
    }

    /// Look up a track by name
    pub fn track(&self, name: &str) -> Result<&TrackData> {
        self.tracks
            .get(name)
            .ok_or_else(|| NuCamError::MissingTrack(name.to_string()))
    }

    /// Look up a reference actor by normalized id (`"Actor007"`) or raw key (`"Actor 7"`)
    pub fn reference_actor(&self, id: &str) -> Result<&Actor> {
        let id = if id.contains(' ') {
            normalize_actor_key(id).map_err(|_| NuCamError::UnknownActor(id.to_string()))?
        } else {
            id.to_string()
        };
        if let Some(actor) = self.reference_actors.get(&id) {
            return Ok(actor);
        }
        match self.rejected_actors.get(&id) {
            Some(rejected) => Err(NuCamError::InvalidActor {
                actor: rejected.key.clone(),
                reason: rejected.reason.clone(),
            }),
            None => Err(NuCamError::UnknownActor(id)),
        }
    }

    /// Reference actors in id order, labelled `"<id> | <display name>"`
    pub fn reference_listing(&self) -> Vec<(&str, String)> {
        self.reference_actors
            .iter()
            .map(|(id, actor)| {
                let name = actor.display_name.as_deref().unwrap_or_default();
                (id.as_str(), format!("{id} | {name}"))
            })
            .collect()
    }
}

impl std::str::FromStr for ExportDocument {
    type Err = NuCamError;

    fn from_str(json: &str) -> Result<Self> {
        Self::from_json(json)
    }
}

/// Turn `"Actor 7"` into `"Actor007"`
pub fn normalize_actor_key(key: &str) -> Result<String> {
    let mut parts = key.split(' ');
    let prefix = parts.next().unwrap_or_default();
    let index = parts
        .next()
        .ok_or_else(|| NuCamError::parse(key, "actor key has no index"))?;
    let index: u32 = index
        .trim()
        .parse()
        .map_err(|e| NuCamError::parse(key, format!("actor index '{index}' is not an integer: {e}")))?;
    Ok(format!("{prefix}{index:03}"))
}
