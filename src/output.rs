use crate::limits::ExecutionLimits;

/// Suffix appended to output that was cut at the byte cap
pub const TRUNCATION_MARKER: &str = "\n[OUTPUT TRUNCATED]";

/// Cap `output` at `limits.max_output_bytes` encoded bytes
///
/// Returns the (possibly truncated) text and whether truncation happened.
/// When cutting, the cut point is moved back to the nearest character
/// boundary so a multi-byte character straddling the cap is dropped
/// silently, then [`TRUNCATION_MARKER`] is appended. The marker does not
/// count toward the budget.
///
/// Pure and deterministic; truncation is reported, never an error.
/// Re-truncating already-marked output does not accumulate markers: the
/// cut lands at or before the old marker, so the tail is re-cut and
/// exactly one marker remains.
pub fn truncate_output(output: &str, limits: &ExecutionLimits) -> (String, bool) {
    if output.len() <= limits.max_output_bytes {
        return (output.to_string(), false);
    }

    let mut cut = limits.max_output_bytes;
    while cut > 0 && !output.is_char_boundary(cut) {
        cut -= 1;
    }

    let mut truncated = output[..cut].to_string();
    truncated.push_str(TRUNCATION_MARKER);
    tracing::trace!(
        original_bytes = output.len(),
        kept_bytes = cut,
        "output truncated"
    );
    (truncated, true)
}

/// [`truncate_output`] for raw captured bytes
///
/// Tool and process output arrives as bytes before anyone has promised it
/// is valid UTF-8. Invalid interior bytes decode lossily to replacement
/// characters; when cutting, trailing bytes that do not form a complete
/// UTF-8 sequence are dropped rather than decoded, since they are an
/// artifact of the cut point, not of the data.
pub fn truncate_output_bytes(output: &[u8], limits: &ExecutionLimits) -> (String, bool) {
    if output.len() <= limits.max_output_bytes {
        return (String::from_utf8_lossy(output).into_owned(), false);
    }

    let cut = strip_incomplete_tail(&output[..limits.max_output_bytes]);
    let mut truncated = String::from_utf8_lossy(cut).into_owned();
    truncated.push_str(TRUNCATION_MARKER);
    (truncated, true)
}

/// Strip a trailing incomplete UTF-8 sequence left by cutting mid-character
///
/// An incomplete sequence is at most 3 bytes (a multi-byte lead plus too
/// few continuation bytes), so only the last 3 bytes need inspecting.
/// Complete-but-invalid bytes are kept for the lossy decode.
fn strip_incomplete_tail(cut: &[u8]) -> &[u8] {
    let tail_start = cut.len().saturating_sub(3);
    for i in (tail_start..cut.len()).rev() {
        let byte = cut[i];
        if byte & 0xC0 == 0x80 {
            // Continuation byte, keep walking back to its lead.
            continue;
        }
        let need = match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        if need > cut.len() - i {
            return &cut[..i];
        }
        break;
    }
    cut
}
