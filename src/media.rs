use image::ImageFormat;

/// Sniff the image format from raw content bytes.
///
/// Classification is content-based (magic bytes), never filename-based, so a
/// `.txt` file holding PNG data is an image and a `.jpg` holding prose is
/// not. Returns `None` for anything `image` does not recognize.
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_magic_is_recognized() {
        let png = b"\x89PNG\r\n\x1a\n0000";
        assert_eq!(sniff_format(png), Some(ImageFormat::Png));
    }

    #[test]
    fn jpeg_magic_is_recognized() {
        let jpeg = b"\xFF\xD8\xFF\xE0rest";
        assert_eq!(sniff_format(jpeg), Some(ImageFormat::Jpeg));
    }

    #[test]
    fn text_is_not_an_image() {
        assert_eq!(sniff_format(b"hello, world"), None);
    }

    #[test]
    fn empty_file_is_not_an_image() {
        assert_eq!(sniff_format(b""), None);
    }
}
