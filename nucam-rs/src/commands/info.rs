//! `info` command: summary of an export document

use anyhow::{Context, Result};
use std::path::Path;

use nu_cam::{ExportDocument, TrackReconstructor};

use crate::utils::{add_table_row, create_table, format_frame_range, format_record};

pub fn execute(path: &Path, detailed: bool) -> Result<()> {
    println!("Loading export: {}", path.display());

    let document = ExportDocument::from_path(path)
        .with_context(|| format!("Failed to load export from {}", path.display()))?;

    println!("\n=== Tracks ===");
    if document.tracks.is_empty() {
        println!("No animation tracks");
    } else {
        let reconstructor = TrackReconstructor::default();
        let mut table = create_table(&["Track", "Frames", "Indices", "Baseline"]);
        for (name, data) in &document.tracks {
            let baseline = if data.original_transform.is_some() { "yes" } else { "no" };
            let (frames, indices) = match reconstructor.reconstruct(data) {
                Ok(track) => (track.frames.len().to_string(), format_frame_range(track.frame_range)),
                Err(e) => {
                    log::warn!("Track '{name}' cannot be reconstructed: {e}");
                    (data.frame_data.len().to_string(), "invalid".to_string())
                }
            };
            add_table_row(
                &mut table,
                vec![name.clone(), frames, indices, baseline.to_string()],
            );
        }
        table.printstd();
    }

    println!("\n=== Camera ===");
    match &document.camera {
        Some(camera) => println!("{}: {}", camera.key, format_record(&camera.transform)),
        None => println!("No camera actor"),
    }

    println!("\n=== Reference Actors ===");
    if document.reference_actors.is_empty() {
        println!("No reference actors");
    } else {
        let mut table = create_table(&["Id", "Name", "Transform"]);
        for (id, actor) in &document.reference_actors {
            add_table_row(
                &mut table,
                vec![
                    id.clone(),
                    actor.display_name.clone().unwrap_or_default(),
                    format_record(&actor.transform),
                ],
            );
        }
        table.printstd();
    }

    if !document.rejected_actors.is_empty() {
        println!("\n=== Unusable Actors ===");
        let mut table = create_table(&["Id", "Key", "Reason"]);
        for (id, rejected) in &document.rejected_actors {
            add_table_row(
                &mut table,
                vec![id.clone(), rejected.key.clone(), rejected.reason.clone()],
            );
        }
        table.printstd();
    }

    if detailed {
        println!("\n=== Detailed Information ===");
        let reconstructor = TrackReconstructor::default();
        for (name, data) in &document.tracks {
            println!("\n{name}:");
            let track = reconstructor
                .reconstruct(data)
                .with_context(|| format!("Failed to reconstruct track '{name}'"))?;
            let mut table = create_table(&["#", "Transform"]);
            for (index, record) in track.frames.iter().enumerate() {
                add_table_row(&mut table, vec![index.to_string(), format_record(record)]);
            }
            table.printstd();
        }
    }

    Ok(())
}
