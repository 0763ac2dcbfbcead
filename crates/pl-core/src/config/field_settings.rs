use std::path::PathBuf;

/// Field configuration DTO (pure data, no logic)
/// 字段配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSettings {
    /// Whether the group search is offered next to the user search
    pub with_groups: bool,

    /// Initial disabled flag
    pub disabled: bool,

    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Directory for rolling log files (path info only, no existence check)
    pub directory: Option<PathBuf>,

    /// `EnvFilter` directives overriding the build defaults
    pub filter: Option<String>,
}

impl FieldSettings {
    /// Create FieldSettings from a TOML value.
    ///
    /// Absent keys are facts, not errors: they map to `false` / `None`.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let field = toml_value.get("field");
        let logging = toml_value.get("logging");

        Ok(Self {
            with_groups: field
                .and_then(|f| f.get("with_groups"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            disabled: field
                .and_then(|f| f.get("disabled"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            logging: LoggingSettings {
                directory: logging
                    .and_then(|l| l.get("directory"))
                    .and_then(|v| v.as_str())
                    .map(PathBuf::from),
                filter: logging
                    .and_then(|l| l.get("filter"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
            },
        })
    }
}
