//! Unit tests for data URIs and downloads

use virtual_wardrobe::response::{base64, DownloadableImage};

#[test]
fn test_create_data_url() {
    assert_eq!(
        base64::create_data_url(&[9, 9], "image/png"),
        "data:image/png;base64,CQk="
    );
    assert_eq!(
        base64::create_data_url(&[1, 2, 3], "image/jpeg"),
        "data:image/jpeg;base64,AQID"
    );
}

#[test]
fn test_base64_decode_plain_and_data_url() {
    assert_eq!(base64::decode("CQk=").unwrap(), vec![9, 9]);
    assert_eq!(base64::decode("data:image/png;base64,CQk=").unwrap(), vec![9, 9]);
    assert!(base64::decode("not valid base64!!!").is_err());
}

#[test]
fn test_detect_media_type() {
    assert_eq!(base64::detect_media_type(b"GIF89a..."), Some("image/gif"));
    assert_eq!(
        base64::detect_media_type(b"RIFF\x00\x00\x00\x00WEBPVP8 "),
        Some("image/webp")
    );
    assert_eq!(base64::detect_media_type(b""), None);
}

#[test]
fn test_downloadable_image() {
    let image =
        DownloadableImage::from_data_url("data:image/png;base64,CQk=", "ai-wardrobe-creation.png")
            .unwrap();

    assert_eq!(image.media_type, "image/png");
    assert_eq!(image.data, vec![9, 9]);
    assert_eq!(
        image.content_disposition(),
        "attachment; filename=\"ai-wardrobe-creation.png\""
    );
}

#[test]
fn test_downloadable_image_rejects_non_data_url() {
    assert!(DownloadableImage::from_data_url("https://example.com/a.png", "a.png").is_err());
}
