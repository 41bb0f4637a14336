//! Fields of the iOS `Info.plist`

use crate::error::Result;
use crate::patch::KeyValuePatcher;

/// `CFBundleShortVersionString`: the user-facing `MAJOR.MINOR.PATCH` version
pub fn short_version_patcher() -> Result<KeyValuePatcher> {
    KeyValuePatcher::new(
        "CFBundleShortVersionString",
        r"<key>CFBundleShortVersionString</key>\s*<string>(\d+\.\d+\.\d+)</string>",
        |value| {
            format!(
                "<key>CFBundleShortVersionString</key>\n\t<string>{}</string>",
                value
            )
        },
    )
}

/// `CFBundleVersion`: the integer build number
pub fn bundle_version_patcher() -> Result<KeyValuePatcher> {
    KeyValuePatcher::new(
        "CFBundleVersion",
        r"<key>CFBundleVersion</key>\s*<string>(\d+)</string>",
        |value| format!("<key>CFBundleVersion</key>\n\t<string>{}</string>", value),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
	<key>CFBundleShortVersionString</key>
	<string>1.2.3</string>
	<key>CFBundleVersion</key>
	<string>42</string>
</dict>
</plist>
"#;

    #[test]
    fn test_extract_fields() {
        assert_eq!(
            short_version_patcher().unwrap().extract(PLIST),
            Some("1.2.3".to_string())
        );
        assert_eq!(
            bundle_version_patcher().unwrap().extract(PLIST),
            Some("42".to_string())
        );
    }

    #[test]
    fn test_bundle_version_does_not_match_short_version() {
        let only_short = "<key>CFBundleShortVersionString</key>\n<string>1.2.3</string>";
        assert_eq!(bundle_version_patcher().unwrap().extract(only_short), None);
    }

    #[test]
    fn test_key_and_value_on_one_line() {
        let inline = "<key>CFBundleVersion</key><string>42</string>";
        let patched = bundle_version_patcher()
            .unwrap()
            .substitute(inline, "43")
            .unwrap();
        assert_eq!(patched, "<key>CFBundleVersion</key>\n\t<string>43</string>");
    }
}
