//! Model name resolution.

/// Default model for the style analysis call.
pub const DEFAULT_ANALYSIS_MODEL: &str = "flash";

/// Default model for the image generation call.
pub const DEFAULT_GENERATION_MODEL: &str = "nano-banana";

/// Short name aliases for the models this tool talks to.
const ALIASES: &[(&str, &str)] = &[
    ("flash", "gemini-3-flash-preview"),
    ("flash-2.5", "gemini-2.5-flash"),
    ("pro", "gemini-3-pro-preview"),
    ("nano-banana", "gemini-2.5-flash-image"),
    ("nano-banana-pro", "gemini-3-pro-image-preview"),
];

/// Resolve a model name (alias or exact) to the full model identifier.
///
/// # Errors
///
/// Returns an error if the resolved name is not a Gemini model.
pub fn resolve_model(name: &str) -> Result<String, String> {
    let resolved = ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, full)| *full);

    if resolved.starts_with("gemini") {
        Ok(resolved.to_string())
    } else {
        Err(format!("Unknown model '{name}'. Expected a 'gemini-*' model or one of: {}", alias_list()))
    }
}

fn alias_list() -> String {
    ALIASES.iter().map(|(alias, _)| *alias).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve() {
        assert_eq!(resolve_model(DEFAULT_ANALYSIS_MODEL).unwrap(), "gemini-3-flash-preview");
        assert_eq!(resolve_model(DEFAULT_GENERATION_MODEL).unwrap(), "gemini-2.5-flash-image");
    }

    #[test]
    fn resolve_pro_aliases() {
        assert_eq!(resolve_model("pro").unwrap(), "gemini-3-pro-preview");
        assert_eq!(resolve_model("nano-banana-pro").unwrap(), "gemini-3-pro-image-preview");
    }

    #[test]
    fn exact_name_passthrough() {
        assert_eq!(resolve_model("gemini-2.0-flash-exp").unwrap(), "gemini-2.0-flash-exp");
    }

    #[test]
    fn unknown_model_rejected() {
        let err = resolve_model("dall-e-3").unwrap_err();
        assert!(err.contains("Unknown model 'dall-e-3'"));
        assert!(err.contains("nano-banana"));
    }
}
