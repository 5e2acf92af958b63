use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a stored or configured label does not name a known variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        $(#[$meta])*
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(
    #[serde(rename_all = "UPPERCASE")]
    LabStatus {
        Normal => "NORMAL",
        Low => "LOW",
        High => "HIGH",
        Critical => "CRITICAL",
        Unknown => "UNKNOWN",
    }
);

impl LabStatus {
    /// Ordering key for triage. UNKNOWN sorts with NORMAL.
    pub fn severity_rank(&self) -> u8 {
        match self {
            Self::Normal | Self::Unknown => 0,
            Self::Low => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }

    /// HIGH or LOW. CRITICAL is counted on its own.
    pub fn is_abnormal(&self) -> bool {
        matches!(self, Self::High | Self::Low)
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Normal => "\u{2705}",
            Self::Low => "\u{2b07}\u{fe0f}",
            Self::High => "\u{2b06}\u{fe0f}",
            Self::Critical => "\u{1f6a8}",
            Self::Unknown => "\u{2753}",
        }
    }

    /// Dashboard colour as a hex triplet.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Normal => "#00cc44",
            Self::Low => "#ffcc00",
            Self::High => "#ff9900",
            Self::Critical => "#ff4444",
            Self::Unknown => "#aaaaaa",
        }
    }
}

str_enum!(
    #[serde(rename_all = "lowercase")]
    GenderScope {
        Male => "male",
        Female => "female",
        All => "all",
    }
);

str_enum!(
    #[serde(rename_all = "snake_case")]
    ExtractionMethod {
        BorderedTable => "bordered_table",
        AlignedTable => "aligned_table",
        TextPattern => "text_pattern",
        Empty => "empty",
    }
);

str_enum!(Language {
    English => "English",
    Telugu => "Telugu",
    Hindi => "Hindi",
});

impl Language {
    /// Speech synthesis language code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Telugu => "te",
            Self::Hindi => "hi",
        }
    }

    /// Parse a language name, falling back to English for anything unrecognized.
    pub fn from_name_or_default(name: &str) -> Self {
        name.trim().parse().unwrap_or(Self::English)
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ranks_follow_triage_order() {
        assert_eq!(LabStatus::Normal.severity_rank(), 0);
        assert_eq!(LabStatus::Low.severity_rank(), 1);
        assert_eq!(LabStatus::High.severity_rank(), 2);
        assert_eq!(LabStatus::Critical.severity_rank(), 3);
        assert_eq!(LabStatus::Unknown.severity_rank(), 0);
    }

    #[test]
    fn only_high_and_low_are_abnormal() {
        assert!(LabStatus::High.is_abnormal());
        assert!(LabStatus::Low.is_abnormal());
        assert!(!LabStatus::Critical.is_abnormal());
        assert!(!LabStatus::Normal.is_abnormal());
        assert!(!LabStatus::Unknown.is_abnormal());
    }

    #[test]
    fn status_display_metadata() {
        let cases = [
            (LabStatus::Normal, "\u{2705}", "#00cc44"),
            (LabStatus::Low, "\u{2b07}\u{fe0f}", "#ffcc00"),
            (LabStatus::High, "\u{2b06}\u{fe0f}", "#ff9900"),
            (LabStatus::Critical, "\u{1f6a8}", "#ff4444"),
            (LabStatus::Unknown, "\u{2753}", "#aaaaaa"),
        ];
        for (status, icon, color) in cases {
            assert_eq!(status.icon(), icon, "{status}");
            assert_eq!(status.color(), color, "{status}");
        }
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            LabStatus::Normal,
            LabStatus::Low,
            LabStatus::High,
            LabStatus::Critical,
            LabStatus::Unknown,
        ] {
            assert_eq!(status.as_str().parse::<LabStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_serializes_upper_case() {
        let json = serde_json::to_string(&LabStatus::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
        let scope = serde_json::to_string(&GenderScope::Female).unwrap();
        assert_eq!(scope, "\"female\"");
        let method = serde_json::to_string(&ExtractionMethod::AlignedTable).unwrap();
        assert_eq!(method, "\"aligned_table\"");
    }

    #[test]
    fn invalid_label_rejected() {
        let err = "SEVERE".parse::<LabStatus>().unwrap_err();
        assert_eq!(err.field, "LabStatus");
        assert_eq!(err.value, "SEVERE");
    }

    #[test]
    fn language_codes() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::Telugu.code(), "te");
        assert_eq!(Language::Hindi.code(), "hi");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(Language::from_name_or_default("Hindi"), Language::Hindi);
        assert_eq!(Language::from_name_or_default(" Telugu "), Language::Telugu);
        assert_eq!(Language::from_name_or_default("Klingon"), Language::English);
        assert_eq!(Language::from_name_or_default(""), Language::English);
    }
}
