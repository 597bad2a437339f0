//! Unified error handling.
//!
//! Error variants are generated by a macro so every variant carries a
//! stable code and a type name alongside its message.

use std::fmt;

/// Generates the error enum.
///
/// For every `Variant("code", "Type Name")` this produces:
/// - the enum variant holding a message
/// - `code()` returning the stable error code
/// - `error_type()` returning the type name
/// - `message()` returning the detail
/// - a snake_case constructor, e.g. `LearnGrowError::database_operation("...")`
macro_rules! define_learngrow_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum LearnGrowError {
            $($variant(String),)*
        }

        impl LearnGrowError {
            pub fn code(&self) -> &'static str {
                match self {
                    $(LearnGrowError::$variant(_) => $code,)*
                }
            }

            pub fn error_type(&self) -> &'static str {
                match self {
                    $(LearnGrowError::$variant(_) => $type_name,)*
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $(LearnGrowError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl LearnGrowError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        LearnGrowError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_learngrow_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
}

impl LearnGrowError {
    /// Colored rendering for development terminals
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LearnGrowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LearnGrowError {}

impl From<sea_orm::DbErr> for LearnGrowError {
    fn from(err: sea_orm::DbErr) -> Self {
        LearnGrowError::DatabaseOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LearnGrowError>;
