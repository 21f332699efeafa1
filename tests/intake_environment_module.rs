use bugdesk::intake::environment::{BrowserKind, DeviceClass, OsKind};
use bugdesk::intake::{detect_environment, FieldKey};

const CASES: &[(&str, DeviceClass, BrowserKind, OsKind)] = &[
    (
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
        DeviceClass::IPhone,
        BrowserKind::Safari,
        OsKind::Ios,
    ),
    (
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) CriOS/120.0.6099.119 Mobile/15E148 Safari/604.1",
        DeviceClass::IPhone,
        BrowserKind::Chrome,
        OsKind::Ios,
    ),
    (
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
        DeviceClass::Mac,
        BrowserKind::Safari,
        OsKind::MacOs,
    ),
    (
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91",
        DeviceClass::Windows,
        BrowserKind::Edge,
        OsKind::Windows,
    ),
    (
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
        DeviceClass::Windows,
        BrowserKind::Firefox,
        OsKind::Windows,
    ),
    (
        "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
        DeviceClass::Android,
        BrowserKind::Chrome,
        OsKind::Android,
    ),
    (
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 OPR/106.0.0.0",
        DeviceClass::Unknown,
        BrowserKind::Opera,
        OsKind::Linux,
    ),
];

#[test]
fn common_user_agents_are_classified() {
    for (user_agent, device, browser, os) in CASES {
        let detected = detect_environment(user_agent);
        assert_eq!(detected.device, *device, "{user_agent}");
        assert_eq!(detected.browser, *browser, "{user_agent}");
        assert_eq!(detected.os, *os, "{user_agent}");
    }
}

#[test]
fn detection_is_pure() {
    for (user_agent, ..) in CASES {
        assert_eq!(detect_environment(user_agent), detect_environment(user_agent));
    }
}

#[test]
fn unrecognized_agents_offer_no_suggestions() {
    for user_agent in ["", "curl/8.4.0", "bugdesk/0.1.0 (plan9)"] {
        let detected = detect_environment(user_agent);
        assert_eq!(detected.device, DeviceClass::Unknown);
        assert_eq!(detected.browser, BrowserKind::Unknown);
        assert_eq!(detected.os, OsKind::Unknown);
        for field in [FieldKey::Device, FieldKey::Browser, FieldKey::Os] {
            assert_eq!(detected.suggestion_for(field), None);
        }
    }
}

#[test]
fn suggestions_use_readable_labels() {
    let detected = detect_environment(CASES[3].0);
    assert_eq!(detected.suggestion_for(FieldKey::Device), Some("Windows PC"));
    assert_eq!(detected.suggestion_for(FieldKey::Browser), Some("Edge"));
    assert_eq!(detected.suggestion_for(FieldKey::Os), Some("Windows"));
    assert_eq!(detected.suggestion_for(FieldKey::Title), None);
}
