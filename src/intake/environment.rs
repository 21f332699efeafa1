//! User-agent classification used to suggest device, browser and OS answers.
//!
//! Each table is evaluated top to bottom and the first rule with a matching
//! needle wins, so precedence is the order of the table.

use crate::intake::step::FieldKey;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeviceClass {
    #[serde(rename = "iPhone")]
    IPhone,
    Mac,
    Windows,
    Android,
    Unknown,
}

impl DeviceClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::IPhone => "iPhone",
            Self::Mac => "Mac",
            Self::Windows => "Windows PC",
            Self::Android => "Android device",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BrowserKind {
    Chrome,
    Safari,
    Firefox,
    Edge,
    Opera,
    Unknown,
}

impl BrowserKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Chrome => "Chrome",
            Self::Safari => "Safari",
            Self::Firefox => "Firefox",
            Self::Edge => "Edge",
            Self::Opera => "Opera",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OsKind {
    #[serde(rename = "iOS")]
    Ios,
    #[serde(rename = "macOS")]
    MacOs,
    Windows,
    Android,
    Linux,
    Unknown,
}

impl OsKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ios => "iOS",
            Self::MacOs => "macOS",
            Self::Windows => "Windows",
            Self::Android => "Android",
            Self::Linux => "Linux",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAgentRule<T> {
    pub needles: &'static [&'static str],
    pub class: T,
}

impl<T: Copy> UserAgentRule<T> {
    pub fn matches(&self, user_agent: &str) -> bool {
        self.needles.iter().any(|needle| user_agent.contains(needle))
    }
}

// iOS agents carry "like Mac OS X", so iPhone-class must precede Mac.
pub const DEVICE_RULES: &[UserAgentRule<DeviceClass>] = &[
    UserAgentRule {
        needles: &["iPhone", "iPad", "iPod"],
        class: DeviceClass::IPhone,
    },
    UserAgentRule {
        needles: &["Android"],
        class: DeviceClass::Android,
    },
    UserAgentRule {
        needles: &["Windows"],
        class: DeviceClass::Windows,
    },
    UserAgentRule {
        needles: &["Macintosh", "Mac OS X"],
        class: DeviceClass::Mac,
    },
];

// Edge and Opera agents also contain "Chrome/", and Chrome agents also
// contain "Safari/".
pub const BROWSER_RULES: &[UserAgentRule<BrowserKind>] = &[
    UserAgentRule {
        needles: &["Edg/", "Edge/", "EdgA/", "EdgiOS/"],
        class: BrowserKind::Edge,
    },
    UserAgentRule {
        needles: &["OPR/", "Opera"],
        class: BrowserKind::Opera,
    },
    UserAgentRule {
        needles: &["Chrome/", "CriOS/"],
        class: BrowserKind::Chrome,
    },
    UserAgentRule {
        needles: &["Firefox/", "FxiOS/"],
        class: BrowserKind::Firefox,
    },
    UserAgentRule {
        needles: &["Safari/"],
        class: BrowserKind::Safari,
    },
];

// Android agents contain "Linux"; iOS agents contain "Mac OS X".
pub const OS_RULES: &[UserAgentRule<OsKind>] = &[
    UserAgentRule {
        needles: &["iPhone", "iPad", "iPod"],
        class: OsKind::Ios,
    },
    UserAgentRule {
        needles: &["Android"],
        class: OsKind::Android,
    },
    UserAgentRule {
        needles: &["Windows"],
        class: OsKind::Windows,
    },
    UserAgentRule {
        needles: &["Macintosh", "Mac OS X"],
        class: OsKind::MacOs,
    },
    UserAgentRule {
        needles: &["Linux"],
        class: OsKind::Linux,
    },
];

pub fn classify<T: Copy>(user_agent: &str, rules: &[UserAgentRule<T>], fallback: T) -> T {
    rules
        .iter()
        .find(|rule| rule.matches(user_agent))
        .map(|rule| rule.class)
        .unwrap_or(fallback)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EnvironmentSuggestion {
    pub device: DeviceClass,
    pub browser: BrowserKind,
    pub os: OsKind,
}

impl EnvironmentSuggestion {
    pub fn unknown() -> Self {
        Self {
            device: DeviceClass::Unknown,
            browser: BrowserKind::Unknown,
            os: OsKind::Unknown,
        }
    }

    /// Suggested answer for an environment field, if one was detected.
    pub fn suggestion_for(&self, field: FieldKey) -> Option<&'static str> {
        let label = match field {
            FieldKey::Device if self.device != DeviceClass::Unknown => self.device.label(),
            FieldKey::Browser if self.browser != BrowserKind::Unknown => self.browser.label(),
            FieldKey::Os if self.os != OsKind::Unknown => self.os.label(),
            _ => return None,
        };
        Some(label)
    }
}

impl Default for EnvironmentSuggestion {
    fn default() -> Self {
        Self::unknown()
    }
}

pub fn detect_environment(user_agent: &str) -> EnvironmentSuggestion {
    EnvironmentSuggestion {
        device: classify(user_agent, DEVICE_RULES, DeviceClass::Unknown),
        browser: classify(user_agent, BROWSER_RULES, BrowserKind::Unknown),
        os: classify(user_agent, OS_RULES, OsKind::Unknown),
    }
}

/// Agent string reported by the terminal front-ends, which have no browser.
pub fn default_user_agent() -> String {
    let platform = match std::env::consts::OS {
        "macos" => "Macintosh; Intel Mac OS X",
        "windows" => "Windows NT 10.0; Win64; x64",
        "linux" => "X11; Linux x86_64",
        "android" => "Linux; Android",
        "ios" => "iPhone; CPU iPhone OS like Mac OS X",
        other => other,
    };
    format!("bugdesk/{} ({platform})", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::{
        classify, detect_environment, BrowserKind, DeviceClass, EnvironmentSuggestion, OsKind,
        BROWSER_RULES,
    };
    use crate::intake::step::FieldKey;

    const IPHONE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const MAC_CHROME: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const WINDOWS_EDGE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91";
    const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.6099.144 Mobile Safari/537.36";
    const LINUX_FIREFOX: &str =
        "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
    const WINDOWS_OPERA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 OPR/106.0.0.0";

    #[test]
    fn iphone_agent_is_iphone_class_on_ios() {
        let detected = detect_environment(IPHONE_SAFARI);
        assert_eq!(detected.device, DeviceClass::IPhone);
        assert_eq!(detected.os, OsKind::Ios);
        assert_eq!(detected.browser, BrowserKind::Safari);
    }

    #[test]
    fn chrome_wins_over_safari_token() {
        let detected = detect_environment(MAC_CHROME);
        assert_eq!(detected.browser, BrowserKind::Chrome);
        assert_eq!(detected.device, DeviceClass::Mac);
        assert_eq!(detected.os, OsKind::MacOs);
    }

    #[test]
    fn edge_and_opera_are_not_reported_as_chrome() {
        assert_eq!(detect_environment(WINDOWS_EDGE).browser, BrowserKind::Edge);
        assert_eq!(detect_environment(WINDOWS_OPERA).browser, BrowserKind::Opera);
        assert_eq!(detect_environment(WINDOWS_EDGE).os, OsKind::Windows);
    }

    #[test]
    fn android_is_not_reported_as_linux() {
        let detected = detect_environment(ANDROID_CHROME);
        assert_eq!(detected.os, OsKind::Android);
        assert_eq!(detected.device, DeviceClass::Android);
    }

    #[test]
    fn desktop_linux_has_no_device_class() {
        let detected = detect_environment(LINUX_FIREFOX);
        assert_eq!(detected.os, OsKind::Linux);
        assert_eq!(detected.browser, BrowserKind::Firefox);
        assert_eq!(detected.device, DeviceClass::Unknown);
    }

    #[test]
    fn unrecognized_agent_falls_back_to_unknown() {
        assert_eq!(detect_environment("curl/8.4.0"), EnvironmentSuggestion::unknown());
        assert_eq!(detect_environment(""), EnvironmentSuggestion::unknown());
    }

    #[test]
    fn detection_is_deterministic() {
        for agent in [IPHONE_SAFARI, MAC_CHROME, WINDOWS_EDGE, ANDROID_CHROME] {
            assert_eq!(detect_environment(agent), detect_environment(agent));
        }
    }

    #[test]
    fn rule_order_decides_precedence() {
        let reversed = BROWSER_RULES.iter().rev().copied().collect::<Vec<_>>();
        assert_eq!(
            classify(MAC_CHROME, &reversed, BrowserKind::Unknown),
            BrowserKind::Safari
        );
    }

    #[test]
    fn unknown_classes_produce_no_suggestion() {
        let detected = detect_environment(LINUX_FIREFOX);
        assert_eq!(detected.suggestion_for(FieldKey::Device), None);
        assert_eq!(detected.suggestion_for(FieldKey::Browser), Some("Firefox"));
        assert_eq!(detected.suggestion_for(FieldKey::Os), Some("Linux"));
        assert_eq!(detected.suggestion_for(FieldKey::Title), None);
    }
}
