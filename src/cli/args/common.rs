//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - human-readable tables and trees (default)
    #[default]
    Table,
    /// JSON format - structured for scripts
    Json,
}

impl OutputFormat {
    /// Parse the `preferences.format` value of the config file.
    pub fn from_preference(value: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(value, true).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_preference() {
        assert_eq!(OutputFormat::from_preference("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_preference("TABLE"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_preference("pretty"), None);
    }
}
