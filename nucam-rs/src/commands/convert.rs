//! `convert` command: run an import against an in-memory scene and export the keys

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use nu_cam::scene::Keyframe;
use nu_cam::{
    Channel, ExportDocument, ImportReport, ImportSettings, Importer, NodeId, RecordingScene,
};

use crate::utils::{add_table_row, create_table, format_frame_range};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the JSON export
    pub file: PathBuf,

    /// Import settings (JSON); flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scene time of the first frame
    #[arg(long, env = "NUCAM_START")]
    pub start: Option<f64>,

    /// Time between frames
    #[arg(long, env = "NUCAM_STEP")]
    pub step: Option<f64>,

    /// Track to convert
    #[arg(short, long, env = "NUCAM_TRACK")]
    pub track: Option<String>,

    /// Name of the rig's top node (defaults to the file stem)
    #[arg(short, long)]
    pub group: Option<String>,

    /// Compose the track's OriginalTransform into every frame
    #[arg(long, env = "NUCAM_LEGACY_OFFSET")]
    pub legacy_offset: bool,

    /// Rotation triples use the older channel layout
    #[arg(long, env = "NUCAM_LEGACY_ROTATION")]
    pub legacy_rotation: bool,

    /// Reference actor placed on the world node (e.g. "Actor007")
    #[arg(short, long)]
    pub reference: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ConvertArgs {
    /// Merge the optional settings file with command-line overrides
    pub fn settings(&self) -> Result<ImportSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open settings file: {}", path.display()))?;
                let value: serde_json::Value = serde_json::from_reader(file)
                    .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
                let has_group = value.get("group_name").is_some();
                let mut settings: ImportSettings = serde_json::from_value(value)
                    .with_context(|| format!("Invalid settings in {}", path.display()))?;
                if !has_group {
                    settings.group_name = file_stem(&self.file);
                }
                settings
            }
            None => ImportSettings {
                group_name: file_stem(&self.file),
                ..Default::default()
            },
        };

        if let Some(start) = self.start {
            settings.start_time = start;
        }
        if let Some(step) = self.step {
            settings.step = step;
        }
        if let Some(track) = &self.track {
            settings.track.clone_from(track);
        }
        if let Some(group) = &self.group {
            settings.group_name.clone_from(group);
        }
        if let Some(reference) = &self.reference {
            settings.reference_actor = Some(reference.clone());
        }
        settings.conversion.legacy_offset |= self.legacy_offset;
        settings.conversion.legacy_rotation_axis_order |= self.legacy_rotation;

        Ok(settings)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.split('.').next())
        .filter(|stem| !stem.is_empty())
        .map_or_else(|| nu_cam::import::DEFAULT_GROUP_NAME.to_string(), str::to_string)
}

/// One exported keyframe
#[derive(Debug, Clone, Serialize)]
pub struct KeyRow {
    pub node: String,
    pub time: f64,
    #[serde(rename = "translateX")]
    pub translate_x: f64,
    #[serde(rename = "translateY")]
    pub translate_y: f64,
    #[serde(rename = "translateZ")]
    pub translate_z: f64,
    #[serde(rename = "rotateX")]
    pub rotate_x: f64,
    #[serde(rename = "rotateY")]
    pub rotate_y: f64,
    #[serde(rename = "rotateZ")]
    pub rotate_z: f64,
    #[serde(rename = "scaleX")]
    pub scale_x: f64,
    #[serde(rename = "scaleY")]
    pub scale_y: f64,
    #[serde(rename = "scaleZ")]
    pub scale_z: f64,
}

impl KeyRow {
    fn new(node: &str, key: &Keyframe) -> Self {
        let value = |channel: Channel| channel.value(&key.transform);
        Self {
            node: node.to_string(),
            time: key.time,
            translate_x: value(Channel::TranslateX),
            translate_y: value(Channel::TranslateY),
            translate_z: value(Channel::TranslateZ),
            rotate_x: value(Channel::RotateX),
            rotate_y: value(Channel::RotateY),
            rotate_z: value(Channel::RotateZ),
            scale_x: value(Channel::ScaleX),
            scale_y: value(Channel::ScaleY),
            scale_z: value(Channel::ScaleZ),
        }
    }

    fn cells(&self) -> Vec<String> {
        let mut cells = vec![self.node.clone(), format!("{}", self.time)];
        cells.extend(
            [
                self.translate_x,
                self.translate_y,
                self.translate_z,
                self.rotate_x,
                self.rotate_y,
                self.rotate_z,
                self.scale_x,
                self.scale_y,
                self.scale_z,
            ]
            .iter()
            .map(|v| format!("{v:.4}")),
        );
        cells
    }
}

/// Reference placement in the JSON output
#[derive(Debug, Clone, Serialize)]
pub struct ReferencePlacement {
    pub actor: String,
    /// World matrix, row-major
    pub matrix: [f64; 16],
}

/// Full JSON output of a conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutput {
    pub track: String,
    pub group: String,
    pub start_time: f64,
    pub end_time: f64,
    pub frames: usize,
    pub frame_range: Option<(u32, u32)>,
    pub reference: Option<ReferencePlacement>,
    pub keyframes: Vec<KeyRow>,
}

/// Run the import and collect the keys of `anim` and `world`
pub fn convert(document: &ExportDocument, settings: ImportSettings) -> Result<ConversionOutput> {
    let mut scene = RecordingScene::new();
    let report: ImportReport<NodeId> = Importer::new(document, settings.clone())
        .run(&mut scene)
        .with_context(|| format!("Failed to convert track '{}'", settings.track))?;

    let keyframes = [("anim", report.rig.anim), ("world", report.rig.world)]
        .into_iter()
        .flat_map(|(name, node)| scene.keyframes(node).iter().map(move |key| KeyRow::new(name, key)))
        .collect();

    Ok(ConversionOutput {
        track: settings.track,
        group: settings.group_name,
        start_time: report.start_time,
        end_time: report.end_time,
        frames: report.frames_emitted,
        frame_range: report.frame_range,
        reference: report.reference.map(|(actor, matrix)| ReferencePlacement {
            actor,
            matrix: matrix.to_row_major_array(),
        }),
        keyframes,
    })
}

pub fn execute(args: &ConvertArgs) -> Result<()> {
    let settings = args.settings()?;
    log::info!("Converting {} with {settings:?}", args.file.display());

    let document = ExportDocument::from_path(&args.file)
        .with_context(|| format!("Failed to load export from {}", args.file.display()))?;
    let output = convert(&document, settings)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_output(&output, args.format, BufWriter::new(file))?;
            println!(
                "Exported {} keyframes to {}",
                output.keyframes.len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            write_output(&output, args.format, stdout.lock())?;
        }
    }

    Ok(())
}

fn write_output<W: Write>(output: &ConversionOutput, format: OutputFormat, mut writer: W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, output).context("Failed to export to JSON")?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for row in &output.keyframes {
                csv_writer.serialize(row).context("Failed to export to CSV")?;
            }
            csv_writer.flush()?;
            return Ok(());
        }
        OutputFormat::Table => {
            writeln!(writer, "=== Conversion ===")?;
            writeln!(writer, "Track:    {}", output.track)?;
            writeln!(writer, "Group:    {}", output.group)?;
            writeln!(writer, "Frames:   {} ({})", output.frames, format_frame_range(output.frame_range))?;
            writeln!(writer, "Playback: {} - {}", output.start_time, output.end_time)?;
            if let Some(reference) = &output.reference {
                writeln!(writer, "Reference: {}", reference.actor)?;
            }
            writeln!(writer)?;

            let mut table = create_table(&[
                "Node", "Time", "tx", "ty", "tz", "rx", "ry", "rz", "sx", "sy", "sz",
            ]);
            for row in &output.keyframes {
                add_table_row(&mut table, row.cells());
            }
            table.print(&mut writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}
