use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// A parsed `.mcmeta` document.
///
/// Every section is optional: a texture sidecar usually carries `animation`
/// and/or `texture`, while a `pack.mcmeta` carries `pack`. Sections absent
/// from the file stay `None`; nothing is defaulted on the parser's side.
/// Fields the parser does not know about are ignored rather than rejected,
/// so files written for newer game versions still load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Mcmeta {
    /// Texture animation properties (`*.png.mcmeta`).
    pub animation: Option<AnimationSection>,
    /// Texture rendering flags (`*.png.mcmeta`).
    pub texture: Option<TextureSection>,
    /// Pack-level metadata (`pack.mcmeta`).
    pub pack: Option<PackSection>,
}

/// The `animation` section of a texture `.mcmeta` file.
///
/// Values are reported exactly as written; the parser does not range-check
/// them (a negative `frametime` is the file's problem, not a parse error).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimationSection {
    /// Ticks per frame.
    pub frametime: Option<i64>,
    /// Whether frames are interpolated.
    pub interpolate: Option<bool>,
    /// Frame width override.
    pub width: Option<i64>,
    /// Frame height override.
    pub height: Option<i64>,
    /// Frame playback order. Absent means "all frames, top to bottom".
    pub frames: Option<Vec<Frame>>,
}

/// One entry of an animation's `frames` list: either a bare frame index or
/// an object pairing an index with a per-frame time.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Frame {
    /// A plain frame index.
    Index(i64),
    /// An index with an explicit per-frame time in ticks.
    Timed {
        index: i64,
        /// Per-frame time; falls back to the section's `frametime` when absent.
        time: Option<i64>,
    },
}

impl Frame {
    /// The frame index regardless of which form the file used.
    pub fn index(&self) -> i64 {
        match *self {
            Frame::Index(index) => index,
            Frame::Timed { index, .. } => index,
        }
    }
}

/// The `texture` section of a texture `.mcmeta` file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextureSection {
    /// Whether the texture is blurred when scaled.
    pub blur: Option<bool>,
    /// Whether texture coordinates are clamped instead of wrapped.
    pub clamp: Option<bool>,
}

/// The `pack` section of a `pack.mcmeta` file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackSection {
    /// The format version of the resource pack.
    pub pack_format: u32,
    /// A description of the resource pack.
    pub description: String,
}

/// Error type for mcmeta parsing.
#[derive(Debug, Error)]
pub enum McmetaError {
    #[error("failed to read the mcmeta file: {0}")]
    FileRead(#[from] std::io::Error),
    /// The document is not valid JSON, or its shape does not match the
    /// mcmeta structure. `line` and `column` point at the offending input.
    #[error("malformed mcmeta document: {message}")]
    Malformed {
        line: usize,
        column: usize,
        message: String,
    },
}

impl From<serde_json::Error> for McmetaError {
    fn from(err: serde_json::Error) -> Self {
        McmetaError::Malformed {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Parses mcmeta text into an [`Mcmeta`] record.
///
/// Pure function of the input: no I/O, no side effects.
///
/// # Arguments
///
/// * `content` - The raw text of a `.mcmeta` file.
///
/// # Returns
///
/// * `Ok(Mcmeta)` if the document is valid JSON of the expected shape.
/// * `Err(McmetaError::Malformed)` otherwise, with a line/column hint.
pub fn parse_mcmeta_str(content: &str) -> Result<Mcmeta, McmetaError> {
    let mcmeta: Mcmeta = serde_json::from_str(content)?;
    Ok(mcmeta)
}

/// Reads a `.mcmeta` file from disk and parses its contents.
///
/// # Arguments
///
/// * `path` - Path to the `.mcmeta` file.
///
/// # Errors
///
/// Returns `McmetaError::FileRead` if the file cannot be read, or
/// `McmetaError::Malformed` if its contents do not parse.
pub fn parse_mcmeta_file<P: AsRef<Path>>(path: P) -> Result<Mcmeta, McmetaError> {
    let content = fs::read_to_string(path)?;
    parse_mcmeta_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_temp_mcmeta(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("pack.mcmeta");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, file_path)
    }

    #[test]
    fn parses_animation_with_plain_frames() {
        let content = r#"{
            "animation": {
                "frametime": 4,
                "interpolate": true,
                "frames": [0, 1, 2, 3]
            }
        }"#;
        let mcmeta = parse_mcmeta_str(content).unwrap();
        let animation = mcmeta.animation.unwrap();
        assert_eq!(animation.frametime, Some(4));
        assert_eq!(animation.interpolate, Some(true));
        assert_eq!(
            animation.frames.unwrap(),
            vec![
                Frame::Index(0),
                Frame::Index(1),
                Frame::Index(2),
                Frame::Index(3)
            ]
        );
        assert!(mcmeta.texture.is_none());
        assert!(mcmeta.pack.is_none());
    }

    #[test]
    fn parses_animation_with_timed_frames() {
        let content = r#"{
            "animation": {
                "frametime": 2,
                "frames": [0, {"index": 1, "time": 10}, 2]
            }
        }"#;
        let mcmeta = parse_mcmeta_str(content).unwrap();
        let frames = mcmeta.animation.unwrap().frames.unwrap();
        assert_eq!(frames[0], Frame::Index(0));
        assert_eq!(
            frames[1],
            Frame::Timed {
                index: 1,
                time: Some(10)
            }
        );
        assert_eq!(frames[1].index(), 1);
        assert_eq!(frames[2], Frame::Index(2));
    }

    #[test]
    fn parses_timed_frame_without_time() {
        let content = r#"{"animation": {"frames": [{"index": 7}]}}"#;
        let frames = parse_mcmeta_str(content)
            .unwrap()
            .animation
            .unwrap()
            .frames
            .unwrap();
        assert_eq!(
            frames[0],
            Frame::Timed {
                index: 7,
                time: None
            }
        );
    }

    #[test]
    fn negative_frametime_is_reported_as_written() {
        let content = r#"{"animation": {"frametime": -3}}"#;
        let mcmeta = parse_mcmeta_str(content).unwrap();
        assert_eq!(mcmeta.animation.unwrap().frametime, Some(-3));
    }

    #[test]
    fn parses_texture_section() {
        let content = r#"{"texture": {"blur": true, "clamp": false}}"#;
        let texture = parse_mcmeta_str(content).unwrap().texture.unwrap();
        assert_eq!(texture.blur, Some(true));
        assert_eq!(texture.clamp, Some(false));
    }

    #[test]
    fn absent_fields_stay_unset() {
        let mcmeta = parse_mcmeta_str(r#"{"texture": {}}"#).unwrap();
        let texture = mcmeta.texture.unwrap();
        assert_eq!(texture.blur, None);
        assert_eq!(texture.clamp, None);
        assert!(mcmeta.animation.is_none());
    }

    #[test]
    fn ignores_unknown_fields() {
        let content = r#"{
            "animation": {"frametime": 1, "brand_new_field": {"x": 1}},
            "villager": {"hat": "partial"}
        }"#;
        let mcmeta = parse_mcmeta_str(content).unwrap();
        assert_eq!(mcmeta.animation.unwrap().frametime, Some(1));
    }

    #[test]
    fn parses_pack_section() {
        let content = r#"{
            "pack": {
                "pack_format": 6,
                "description": "A test resource pack"
            }
        }"#;
        let pack = parse_mcmeta_str(content).unwrap().pack.unwrap();
        assert_eq!(pack.pack_format, 6);
        assert_eq!(pack.description, "A test resource pack");
    }

    #[test]
    fn malformed_document_reports_location() {
        let result = parse_mcmeta_str("{\n  \"animation\": {,\n}");
        match result {
            Err(McmetaError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn returns_error_for_wrong_field_type() {
        let content = r#"{"pack": {"pack_format": "not_a_number", "description": "x"}}"#;
        assert!(matches!(
            parse_mcmeta_str(content),
            Err(McmetaError::Malformed { .. })
        ));
    }

    #[test]
    fn returns_error_for_empty_input() {
        assert!(parse_mcmeta_str("").is_err());
    }

    #[test]
    fn parses_file_from_disk() {
        let (_dir, file_path) =
            write_temp_mcmeta(r#"{"pack": {"pack_format": 9, "description": "on disk"}}"#);
        let mcmeta = parse_mcmeta_file(&file_path).unwrap();
        assert_eq!(mcmeta.pack.unwrap().pack_format, 9);
    }

    #[test]
    fn returns_error_for_missing_file() {
        let result = parse_mcmeta_file("non_existent_file.mcmeta");
        assert!(matches!(result, Err(McmetaError::FileRead(_))));
    }
}
