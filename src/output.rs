//! CLI output formatting.
//!
//! Every `format_*` function is pure and returns display lines; the
//! matching `print_*` wrapper writes them to stdout. Diagnostics go through
//! `tracing` on stderr and never appear here.
//!
//! # Output Format
//!
//! ## Thumbnails
//!
//! ```text
//! Found 3 original images
//! 001 a.jpg: new
//!     Corrected: white balance, auto levels
//!     Thumbnail: 200x400 (from 1000x2000)
//! 002 b.jpg: rotated
//!     Corrected: rotated 4000x3000 -> 3000x4000
//!     Thumbnail: 600x800 (from 3000x4000)
//! 003 c.jpg: ok (thumbnail 200x400)
//!
//! Summary
//!     Processed: 3 images
//!     Rotated originals: 1
//!     New images (with white balance): 1
//!     Fixed existing thumbnails: 0
//!     Already correct: 1
//! ```
//!
//! ## Center
//!
//! ```text
//! Canvas: 3000x4000
//! Source: odd.jpg (2800x3900)
//! Offset: (100, 50)
//! Saved: photos/odd_centered.jpg
//! Thumbnail: photos/thumb/odd_centered.jpg (600x800)
//!
//! To use it, replace "odd.jpg" with "odd_centered.jpg"
//! ```

use crate::center::CenterOutcome;
use crate::imaging::Dimensions;
use crate::policy::ImageStatus;
use crate::process::{Correction, ProcessEvent, ProcessSummary};

/// Format a positional index as a zero-padded 3-digit string.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Status text with the detail each status carries.
fn status_detail(status: &ImageStatus) -> String {
    match status {
        ImageStatus::New => "new".to_string(),
        ImageStatus::Rotated { is_new: true } => "rotated (new)".to_string(),
        ImageStatus::Rotated { is_new: false } => "rotated".to_string(),
        ImageStatus::WrongSize {
            found: Some(found),
            expected,
        } => format!("wrong size ({found}, expected ~{expected})"),
        ImageStatus::WrongSize {
            found: None,
            expected,
        } => format!("wrong size (unreadable, expected ~{expected})"),
        ImageStatus::Ok { thumbnail } => format!("ok (thumbnail {thumbnail})"),
    }
}

fn correction_label(correction: &Correction) -> String {
    match correction {
        Correction::Rotated { from, to } => format!("rotated {from} -> {to}"),
        Correction::WhiteBalance => "white balance".to_string(),
        Correction::AutoLevels => "auto levels".to_string(),
    }
}

// ============================================================================
// Thumbnails
// ============================================================================

/// Format a single process progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Started { image_count } => {
            vec![format!("Found {} original images", image_count)]
        }
        ProcessEvent::ImageChecked {
            index,
            filename,
            status,
            ..
        } => vec![format!(
            "{} {}: {}",
            format_index(*index),
            filename,
            status_detail(status)
        )],
        ProcessEvent::ImageProcessed {
            index,
            filename,
            status,
            corrections,
            original,
            thumbnail,
        } => {
            let mut lines = vec![format!(
                "{} {}: {}",
                format_index(*index),
                filename,
                status_detail(status)
            )];
            if !corrections.is_empty() {
                let labels: Vec<String> = corrections.iter().map(correction_label).collect();
                lines.push(format!("    Corrected: {}", labels.join(", ")));
            }
            lines.push(format!("    Thumbnail: {} (from {})", thumbnail, original));
            lines
        }
        ProcessEvent::ImageFailed {
            index,
            filename,
            reason,
        } => vec![
            format!("{} {}: failed", format_index(*index), filename),
            format!("    Error: {}", reason),
        ],
    }
}

/// Format the end-of-run counters.
pub fn format_summary(summary: &ProcessSummary) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "Summary".to_string(),
        format!("    Processed: {} images", summary.processed),
        format!("    Rotated originals: {}", summary.rotated),
        format!("    New images (with white balance): {}", summary.created),
        format!("    Fixed existing thumbnails: {}", summary.fixed),
        format!("    Already correct: {}", summary.already_correct()),
    ];
    if summary.failed > 0 {
        lines.push(format!("    Failed: {}", summary.failed));
    }
    lines
}

pub fn print_summary(summary: &ProcessSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Center / canvas
// ============================================================================

/// Format the result of centering one image, ending with the replacement hint.
pub fn format_center_output(outcome: &CenterOutcome) -> Vec<String> {
    vec![
        format!("Canvas: {}", outcome.canvas),
        format!("Source: {} ({})", outcome.target, outcome.source),
        format!("Offset: ({}, {})", outcome.offset.0, outcome.offset.1),
        format!("Saved: {}", outcome.full_size_path.display()),
        format!(
            "Thumbnail: {} ({})",
            outcome.thumbnail_path.display(),
            outcome.thumbnail
        ),
        String::new(),
        format!(
            "To use it, replace \"{}\" with \"{}\"",
            outcome.target, outcome.output
        ),
    ]
}

pub fn print_center_output(outcome: &CenterOutcome) {
    for line in format_center_output(outcome) {
        println!("{}", line);
    }
}

pub fn format_canvas(canvas: Dimensions) -> Vec<String> {
    vec![format!(
        "Canonical canvas: {} (width {}, height {})",
        canvas, canvas.width, canvas.height
    )]
}

pub fn print_canvas(canvas: Dimensions) {
    for line in format_canvas(canvas) {
        println!("{}", line);
    }
}
