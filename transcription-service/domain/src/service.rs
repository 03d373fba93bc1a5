/// Browsers record microphone audio as `video/webm`; everything else must
/// declare an `audio/*` type.
pub fn is_supported_media_type(content_type: &str) -> bool {
    content_type.starts_with("audio/") || content_type == "video/webm"
}

/// Extension for the scratch file handed to the engine. The decoder probes
/// by content, but the extension is kept as a format hint.
pub fn file_extension_for(content_type: &str) -> &'static str {
    if content_type.contains("webm") {
        ".webm"
    } else {
        ".mp3"
    }
}
