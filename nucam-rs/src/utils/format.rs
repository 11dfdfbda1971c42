//! Formatting utilities

use nu_cam::TransformRecord;

/// Format three values as `(x, y, z)` with three decimals
pub fn format_triple(values: [f64; 3]) -> String {
    format!("({:.3}, {:.3}, {:.3})", values[0], values[1], values[2])
}

/// Translation, rotation and scale on one line
pub fn format_record(record: &TransformRecord) -> String {
    format!(
        "T {} R {} S {}",
        format_triple(record.translation.to_array()),
        format_triple(record.rotation.to_array()),
        format_triple(record.scale.to_array())
    )
}

/// Format an inclusive frame index range
pub fn format_frame_range(range: Option<(u32, u32)>) -> String {
    match range {
        Some((first, last)) if first == last => first.to_string(),
        Some((first, last)) => format!("{first}..={last}"),
        None => "N/A".to_string(),
    }
}
