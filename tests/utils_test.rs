use collagefm::management::SearchHistory;
use collagefm::pipeline::GenerationCounter;
use collagefm::types::{ItemKind, Period, Template};
use collagefm::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    assert!(!challenge.is_empty());

    // Deterministic for the same verifier
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // URL-safe base64 without padding
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_secure_url_rewrites_http() {
    assert_eq!(
        secure_url("http://lastfm.freetls.fastly.net/i/u/300x300/abc.png"),
        "https://lastfm.freetls.fastly.net/i/u/300x300/abc.png"
    );
}

#[test]
fn test_secure_url_is_idempotent() {
    let once = secure_url("http://example.com/cover.jpg");
    let twice = secure_url(&once);
    assert_eq!(once, twice);

    // Already-secure and non-http URLs pass through unchanged
    assert_eq!(secure_url("https://example.com/a.png"), "https://example.com/a.png");
    assert_eq!(secure_url("file:///tmp/a.png"), "file:///tmp/a.png");
}

#[test]
fn test_parse_period() {
    assert_eq!(parse_period("7day").unwrap(), Period::SevenDay);
    assert_eq!(parse_period("1month").unwrap(), Period::OneMonth);
    assert_eq!(parse_period("3month").unwrap(), Period::ThreeMonth);
    assert_eq!(parse_period("6month").unwrap(), Period::SixMonth);
    assert_eq!(parse_period("12month").unwrap(), Period::TwelveMonth);
    assert_eq!(parse_period("overall").unwrap(), Period::Overall);

    // Case-insensitive with friendly aliases
    assert_eq!(parse_period("WEEK").unwrap(), Period::SevenDay);
    assert_eq!(parse_period("all").unwrap(), Period::Overall);

    assert!(parse_period("fortnight").is_err());
}

#[test]
fn test_parse_kind() {
    assert_eq!(parse_kind("albums").unwrap(), ItemKind::Albums);
    assert_eq!(parse_kind("artist").unwrap(), ItemKind::Artists);
    assert_eq!(parse_kind("Tracks").unwrap(), ItemKind::Tracks);
    assert!(parse_kind("genres").is_err());
}

#[test]
fn test_parse_template() {
    assert_eq!(parse_template("classic").unwrap(), Template::Classic);
    assert_eq!(parse_template("Polaroid").unwrap(), Template::Polaroid);
    assert_eq!(parse_template("minimal").unwrap(), Template::Minimal);
    assert_eq!(parse_template("mosaic").unwrap(), Template::Mosaic);
    assert_eq!(parse_template("vinyl").unwrap(), Template::Vinyl);
    assert!(parse_template("brutalist").is_err());
}

#[test]
fn test_period_wire_values() {
    // The API strings must round-trip through the parser
    for period in [
        Period::SevenDay,
        Period::OneMonth,
        Period::ThreeMonth,
        Period::SixMonth,
        Period::TwelveMonth,
        Period::Overall,
    ] {
        assert_eq!(parse_period(period.as_api_str()).unwrap(), period);
    }
}

#[test]
fn test_group_thousands() {
    assert_eq!(group_thousands(0), "0");
    assert_eq!(group_thousands(999), "999");
    assert_eq!(group_thousands(1000), "1,000");
    assert_eq!(group_thousands(1234567), "1,234,567");
}

#[test]
fn test_collage_filename_shape() {
    let name = collage_filename(Template::Vinyl);
    assert!(name.starts_with("collagefm-vinyl-"));
    assert!(name.ends_with(".png"));

    // Timestamp part is 14 digits
    let stamp = &name["collagefm-vinyl-".len()..name.len() - ".png".len()];
    assert_eq!(stamp.len(), 14);
    assert!(stamp.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_search_history_records_most_recent_first() {
    let mut history = SearchHistory::default();
    history.record("alice");
    history.record("bob");

    assert_eq!(history.usernames(), ["bob", "alice"]);
    assert_eq!(history.last_username(), Some("bob"));
}

#[test]
fn test_search_history_deduplicates() {
    let mut history = SearchHistory::default();
    history.record("alice");
    history.record("bob");
    history.record("alice");

    // Re-recording moves to the front instead of duplicating
    assert_eq!(history.usernames(), ["alice", "bob"]);
    assert_eq!(history.last_username(), Some("alice"));
}

#[test]
fn test_search_history_is_capped() {
    let mut history = SearchHistory::default();
    for name in ["a", "b", "c", "d", "e", "f", "g"] {
        history.record(name);
    }

    assert_eq!(history.usernames().len(), SearchHistory::MAX_ENTRIES);
    assert_eq!(history.usernames()[0], "g");
    // Oldest entries fell off
    assert!(!history.usernames().contains(&"a".to_string()));
    assert!(!history.usernames().contains(&"b".to_string()));
}

#[test]
fn test_search_history_clear() {
    let mut history = SearchHistory::default();
    history.record("alice");
    history.clear();

    assert!(history.usernames().is_empty());
    assert_eq!(history.last_username(), None);
}

#[test]
fn test_generation_counter_is_monotonic() {
    let counter = GenerationCounter::new();

    let first = counter.next();
    let second = counter.next();
    assert!(second > first);
}

#[test]
fn test_generation_counter_supersedes_older_tokens() {
    let counter = GenerationCounter::new();

    let first = counter.next();
    assert!(counter.is_current(first));

    let second = counter.next();
    assert!(!counter.is_current(first));
    assert!(counter.is_current(second));
}
