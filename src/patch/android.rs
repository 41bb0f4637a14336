//! Fields of the Android `build.gradle`

use crate::error::Result;
use crate::patch::KeyValuePatcher;

/// `versionName "X.Y.Z"`: the user-facing version, quoted
pub fn version_name_patcher() -> Result<KeyValuePatcher> {
    KeyValuePatcher::new(
        "versionName",
        r#"versionName "(\d+\.\d+\.\d+)""#,
        |value| format!("versionName \"{}\"", value),
    )
}

/// `versionCode N`: the integer build number, bare
pub fn version_code_patcher() -> Result<KeyValuePatcher> {
    KeyValuePatcher::new("versionCode", r"versionCode (\d+)", |value| {
        format!("versionCode {}", value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRADLE: &str = r#"android {
    defaultConfig {
        applicationId "com.example.app"
        versionCode 7
        versionName "1.2.3"
    }
}
"#;

    #[test]
    fn test_extract_fields() {
        assert_eq!(
            version_name_patcher().unwrap().extract(GRADLE),
            Some("1.2.3".to_string())
        );
        assert_eq!(
            version_code_patcher().unwrap().extract(GRADLE),
            Some("7".to_string())
        );
    }

    #[test]
    fn test_substitute_keeps_surrounding_text() {
        let patched = version_code_patcher()
            .unwrap()
            .substitute(GRADLE, "8")
            .unwrap();
        assert!(patched.contains("        versionCode 8\n"));
        assert!(patched.contains("applicationId \"com.example.app\""));
    }

    #[test]
    fn test_unquoted_version_name_is_not_matched() {
        assert_eq!(
            version_name_patcher()
                .unwrap()
                .extract("versionName flavorVersion"),
            None
        );
    }
}
