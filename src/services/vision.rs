//! Crop-image analysis adapter.
//!
//! Uploads arrive in whatever raster format the client produced; everything
//! is re-encoded to JPEG before the vision call so the provider sees one
//! format. Failure at any stage degrades to an explanatory string.

use std::io::Cursor;

use tracing::warn;

use crate::state::AppState;

pub const NOT_CONFIGURED: &str =
    "Image analysis requires a vision API key. Please configure your API key.";

/// Fixed multi-part prompt: crop identification, disease detection,
/// treatment, prevention.
pub const ANALYSIS_PROMPT: &str = "Analyze this crop image and provide the following information:\n\
    1. Identify the crop in the image\n\
    2. Detect any diseases or pests visible\n\
    3. Provide treatment recommendations\n\
    4. Suggest preventive measures\n\n\
    Format your response in a clear, structured way that would be helpful for a farmer.";

/// Analyze an uploaded crop image, returning free text.
pub async fn analyze(state: &AppState, image_bytes: &[u8]) -> String {
    let Some(vision) = &state.vision else {
        return NOT_CONFIGURED.to_string();
    };

    let jpeg = match reencode_jpeg(image_bytes) {
        Ok(jpeg) => jpeg,
        Err(e) => {
            warn!(error = %e, "image re-encode failed");
            return format!("Error analyzing image: {e}");
        }
    };

    match vision.analyze_image(ANALYSIS_PROMPT, &jpeg).await {
        Ok(text) => text,
        Err(e) => {
            warn!(reason = e.reason(), error = %e, "vision analysis failed");
            format!("Error analyzing image: {e}")
        }
    }
}

/// Decode any supported raster format and re-encode as JPEG. Alpha is
/// dropped first: the JPEG encoder rejects RGBA buffers.
pub(crate) fn reencode_jpeg(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    let rgb = img.to_rgb8();
    let mut out = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Jpeg)?;
    Ok(out)
}

#[cfg(test)]
#[path = "vision_test.rs"]
mod tests;
