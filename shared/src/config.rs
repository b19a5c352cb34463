pub const PROMPT_KEY_NAME: &str = "PROMPT_KEY_NAME";
pub const BUCKET_NAME: &str = "BUCKET_NAME";
pub const MODEL_ID: &str = "MODEL_ID";
pub const LIST_ALL_PAGES: &str = "LIST_ALL_PAGES";

pub const DEFAULT_PROMPT_KEY: &str = "prompt.txt";
pub const DEFAULT_BUCKET_NAME: &str = "my-bucket";
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

/// Process-wide settings, resolved once at start-up and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub prompt_key: String,
    /// Only the batch runner reads this; notifications carry their own bucket.
    pub bucket_name: String,
    pub model_id: String,
    pub list_all_pages: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt_key: DEFAULT_PROMPT_KEY.to_owned(),
            bucket_name: DEFAULT_BUCKET_NAME.to_owned(),
            model_id: DEFAULT_MODEL_ID.to_owned(),
            list_all_pages: false,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        Self {
            prompt_key: value(PROMPT_KEY_NAME, DEFAULT_PROMPT_KEY),
            bucket_name: value(BUCKET_NAME, DEFAULT_BUCKET_NAME),
            model_id: value(MODEL_ID, DEFAULT_MODEL_ID),
            list_all_pages: lookup(LIST_ALL_PAGES)
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.prompt_key, "prompt.txt");
        assert_eq!(settings.model_id, "anthropic.claude-3-sonnet-20240229-v1:0");
        assert!(!settings.list_all_pages);
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::from_lookup(lookup(&[
            (PROMPT_KEY_NAME, "instructions.txt"),
            (BUCKET_NAME, "uploads"),
            (MODEL_ID, "anthropic.claude-3-haiku-20240307-v1:0"),
            (LIST_ALL_PAGES, "TRUE"),
        ]));

        assert_eq!(settings.prompt_key, "instructions.txt");
        assert_eq!(settings.bucket_name, "uploads");
        assert_eq!(settings.model_id, "anthropic.claude-3-haiku-20240307-v1:0");
        assert!(settings.list_all_pages);
    }

    #[test]
    fn empty_values_fall_back() {
        let settings = Settings::from_lookup(lookup(&[(PROMPT_KEY_NAME, ""), (LIST_ALL_PAGES, "no")]));
        assert_eq!(settings.prompt_key, DEFAULT_PROMPT_KEY);
        assert!(!settings.list_all_pages);
    }
}
