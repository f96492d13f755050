use evolution_core::{Version, VersionTag};

fn parsed(input: &str) -> (u64, Option<u64>, Option<u64>) {
    let version = Version::parse(input).unwrap();
    (version.major(), version.minor(), version.patch())
}

#[test]
fn numeric_forms_keep_exactly_the_given_components() {
    for major in [0_u64, 5, 42] {
        assert_eq!(parsed(&format!("{major}")), (major, None, None));
        for minor in [0_u64, 9, 10] {
            assert_eq!(
                parsed(&format!("{major}.{minor}")),
                (major, Some(minor), None)
            );
            assert_eq!(
                parsed(&format!("{major}.{minor}.3")),
                (major, Some(minor), Some(3))
            );
        }
    }
}

#[test]
fn first_numeric_run_wins() {
    assert_eq!(parsed("v5.9.1-beta"), (5, Some(9), Some(1)));
    assert_eq!(parsed("Swift 4.2 and 5.0"), (4, Some(2), None));
    assert_eq!(parsed("1.2.3.4"), (1, Some(2), Some(3)));
}

#[test]
fn text_without_digits_is_no_match() {
    assert!(Version::parse("").is_none());
    assert!(Version::parse("Swift Next").is_none());
    assert!(Version::parse("...").is_none());
}

#[test]
fn missing_components_equal_zero() {
    let five = Version::parse("5").unwrap();
    assert_eq!(five, Version::parse("5.0.0").unwrap());
    assert_eq!(five, Version::parse("5.0").unwrap());
    assert_ne!(five, Version::parse("5.0.1").unwrap());
    assert_eq!(five.to_string(), "5");
}

#[test]
fn ordering_is_lexicographic() {
    let mut versions: Vec<Version> = ["6.0", "5.10", "4.2.1", "5.9", "5", "5.9.1"]
        .iter()
        .map(|raw| Version::parse(raw).unwrap())
        .collect();
    versions.sort();
    let rendered: Vec<String> = versions.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["4.2.1", "5", "5.9", "5.9.1", "5.10", "6.0"]);

    // A higher major outranks a higher minor.
    assert!(Version::parse("6.0").unwrap() > Version::parse("5.10").unwrap());
    assert!(Version::parse("5.1.9").unwrap() < Version::parse("5.2").unwrap());
}

#[test]
fn version_tag_prefers_numbers_then_next_keyword() {
    assert_eq!(
        VersionTag::from_text("Swift 5.9"),
        VersionTag::Specific(Version::parse("5.9").unwrap())
    );
    assert_eq!(VersionTag::from("NEXT"), VersionTag::Next);
    assert_eq!(VersionTag::from("tbd"), VersionTag::Unknown);
}
