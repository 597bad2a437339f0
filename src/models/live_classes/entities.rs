use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const MIN_DURATION_MINUTES: i32 = 15;
pub const MAX_DURATION_MINUTES: i32 = 480;

/// Defines a string-backed enum whose wire form is the variant name and
/// whose parsing ignores ASCII case.
macro_rules! define_live_class_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
        #[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .copied()
                    .ok_or_else(|| {
                        let supported: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        format!(
                            "invalid {}: '{}'. Supported: {}",
                            stringify!($name),
                            s,
                            supported.join(", ")
                        )
                    })
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

define_live_class_enum! {
    /// Meeting platform hosting the session
    Platform { Zoom, Meet, Other }
}

define_live_class_enum! {
    /// Session status; transitions only through explicit updates
    LiveClassStatus { Scheduled, Completed, Cancelled }
}

/// Course joined onto a live class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
pub struct LiveClassCourse {
    pub id: i64,
    pub title: String,
}

/// Instructor joined onto a live class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
pub struct LiveClassInstructor {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
pub struct LiveClass {
    pub id: i64,
    pub title: String,
    pub course_id: i64,
    pub instructor_id: i64,
    pub scheduled_at: DateTime<Utc>,
    // minutes
    pub duration: i32,
    pub platform: Platform,
    pub meeting_link: String,
    pub recorded_link: Option<String>,
    pub status: LiveClassStatus,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // null when the reference dangles
    pub course: Option<LiveClassCourse>,
    pub instructor: Option<LiveClassInstructor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parse_ignores_case() {
        assert_eq!("Zoom".parse::<Platform>().unwrap(), Platform::Zoom);
        assert_eq!("meet".parse::<Platform>().unwrap(), Platform::Meet);
        assert_eq!("OTHER".parse::<Platform>().unwrap(), Platform::Other);
        assert!("teams".parse::<Platform>().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&LiveClassStatus::Cancelled).unwrap(),
            "\"Cancelled\""
        );
        let parsed: LiveClassStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, LiveClassStatus::Completed);
        assert!(serde_json::from_str::<LiveClassStatus>("\"postponed\"").is_err());
    }
}
