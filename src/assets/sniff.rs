//! Lightweight image format detection for downloaded assets.
//!
//! Only the container framing is checked: a leading signature and, where the
//! format has one, the trailing end marker. This catches HTML error pages
//! saved under an image name and downloads cut short mid-transfer.

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const PNG_IEND: &[u8] = b"IEND\xaeB`\x82";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::WebP => "webp",
        }
    }

    /// Identify the format from the leading bytes
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(PNG_SIGNATURE) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(ImageFormat::WebP)
        } else {
            None
        }
    }

    /// True when the data carries this format's end marker (or declared length)
    fn is_complete(&self, bytes: &[u8]) -> bool {
        match self {
            // Some encoders pad after EOI, so look near the end rather than at it
            ImageFormat::Jpeg => {
                let tail = &bytes[bytes.len().saturating_sub(64)..];
                tail.windows(2).any(|w| w == [0xFF, 0xD9])
            }
            ImageFormat::Png => {
                let tail = &bytes[bytes.len().saturating_sub(64)..];
                tail.windows(PNG_IEND.len()).any(|w| w == PNG_IEND)
            }
            ImageFormat::Gif => bytes.last() == Some(&0x3B),
            ImageFormat::WebP => {
                let declared = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
                bytes.len() as u64 >= u64::from(declared) + 8
            }
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Format of a complete image, or `None` for anything else
pub fn well_formed_image(bytes: &[u8]) -> Option<ImageFormat> {
    ImageFormat::detect(bytes).filter(|format| format.is_complete(bytes))
}


#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend(std::iter::repeat(0).take(32));
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes.extend_from_slice(PNG_IEND);
        bytes
    }

    fn webp(payload: usize) -> Vec<u8> {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&((payload + 4) as u32).to_le_bytes());
        bytes.extend_from_slice(b"WEBP");
        bytes.extend(std::iter::repeat(1).take(payload));
        bytes
    }

    #[test]
    fn test_detect_formats() {
        assert_eq!(ImageFormat::detect(&fixtures::jpeg()), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::detect(&png()), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::detect(b"GIF89a\x01\x00;"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::detect(&webp(16)), Some(ImageFormat::WebP));
    }

    #[test]
    fn test_well_formed_accepts_complete_images() {
        assert_eq!(well_formed_image(&fixtures::jpeg()), Some(ImageFormat::Jpeg));
        assert_eq!(well_formed_image(&png()), Some(ImageFormat::Png));
        assert_eq!(well_formed_image(b"GIF89a\x01\x00\x01\x00;"), Some(ImageFormat::Gif));
        assert_eq!(well_formed_image(&webp(16)), Some(ImageFormat::WebP));
    }

    #[test]
    fn test_truncated_images_rejected() {
        assert_eq!(well_formed_image(&fixtures::truncated_jpeg()), None);

        let mut cut_png = png();
        cut_png.truncate(cut_png.len() - 4);
        assert_eq!(well_formed_image(&cut_png), None);

        let mut cut_webp = webp(64);
        cut_webp.truncate(40);
        assert_eq!(well_formed_image(&cut_webp), None);
    }

    #[test]
    fn test_non_images_rejected() {
        assert_eq!(well_formed_image(b""), None);
        assert_eq!(well_formed_image(b"<!DOCTYPE html><html></html>"), None);
        assert_eq!(well_formed_image(b"RIFF"), None);
    }
}
