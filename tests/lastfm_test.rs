use collagefm::error::ApiError;
use collagefm::lastfm::error_envelope;
use collagefm::types::TopAlbumsResponse;

#[test]
fn test_error_envelope_detected_whatever_the_status_was() {
    let body: serde_json::Value =
        serde_json::from_str(r#"{"error": 6, "message": "User not found"}"#).unwrap();

    match error_envelope(&body) {
        Some(ApiError::Remote { code, message }) => {
            assert_eq!(code, 6);
            assert_eq!(message, "User not found");
        }
        other => panic!("expected a remote error, got {:?}", other),
    }
}

#[test]
fn test_error_envelope_without_message_gets_a_fallback() {
    let body: serde_json::Value = serde_json::from_str(r#"{"error": 29}"#).unwrap();

    match error_envelope(&body) {
        Some(ApiError::Remote { code, message }) => {
            assert_eq!(code, 29);
            assert_eq!(message, "unknown error");
        }
        other => panic!("expected a remote error, got {:?}", other),
    }
}

#[test]
fn test_regular_payloads_carry_no_envelope() {
    let body: serde_json::Value =
        serde_json::from_str(r#"{"topalbums": {"album": []}}"#).unwrap();
    assert!(error_envelope(&body).is_none());
}

// The audioscrobbler JSON rendering keeps its XML-era artifacts: numbers as
// strings, image URLs under "#text", ranks under "@attr".
#[test]
fn test_top_albums_wire_format_decodes() {
    let body = r##"{
        "topalbums": {
            "album": [
                {
                    "name": "Mezzanine",
                    "playcount": "143",
                    "artist": {"name": "Massive Attack"},
                    "image": [
                        {"#text": "http://img/s.png", "size": "small"},
                        {"#text": "http://img/xl.png", "size": "extralarge"}
                    ],
                    "@attr": {"rank": "1"}
                }
            ]
        }
    }"##;

    let decoded: TopAlbumsResponse = serde_json::from_str(body).unwrap();
    let album = &decoded.topalbums.album[0];
    assert_eq!(album.name, "Mezzanine");
    assert_eq!(album.playcount, "143");
    assert_eq!(album.artist.name, "Massive Attack");
    assert_eq!(album.image[1].url, "http://img/xl.png");
    assert_eq!(album.attr.as_ref().unwrap().rank, "1");
}
