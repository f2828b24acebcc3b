//! CLI argument parsing with clap.

use clap::Parser;

use crate::pipeline::TransformationMode;

/// Regenerate a subject photo in the style of a reference image.
#[derive(Parser, Debug)]
#[command(name = "stylefusion", version, about)]
pub struct Cli {
    /// Extra instructions for the final image (e.g. "make the lighting darker").
    #[arg(conflicts_with = "prompt_file")]
    pub prompt: Option<String>,

    /// Path to a file containing the extra instructions.
    #[arg(short = 'p', long, conflicts_with = "prompt")]
    pub prompt_file: Option<String>,

    /// Identity image: path or `data:` URI of the subject to preserve.
    #[arg(short, long)]
    pub identity: Option<String>,

    /// Style reference image: path or `data:` URI.
    #[arg(short, long)]
    pub style: Option<String>,

    /// Transformation mode [default: from config, else realistic].
    #[arg(short, long, value_enum)]
    pub mode: Option<TransformationMode>,

    /// Generation model name or short alias.
    #[arg(long)]
    pub model: Option<String>,

    /// Style analysis model name or short alias.
    #[arg(long)]
    pub analysis_model: Option<String>,

    /// Output format: png, jpeg, webp.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Output file path (auto-generated if not specified).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the result as a data URI on stdout instead of saving a file.
    #[arg(long)]
    pub data_uri: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the user instruction from the positional argument or the file flag.
    ///
    /// Neither being given is fine: the instruction is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt file cannot be read.
    pub fn resolve_prompt(&self) -> Result<String, std::io::Error> {
        if let Some(ref text) = self.prompt {
            Ok(text.clone())
        } else if let Some(ref path) = self.prompt_file {
            std::fs::read_to_string(path)
        } else {
            Ok(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_prompt() {
        let cli = Cli::parse_from(["stylefusion", "-i", "me.jpg", "add rain"]);
        assert_eq!(cli.prompt.as_deref(), Some("add rain"));
        assert_eq!(cli.identity.as_deref(), Some("me.jpg"));
        assert_eq!(cli.resolve_prompt().unwrap(), "add rain");
    }

    #[test]
    fn prompt_file_flag() {
        let dir = std::env::temp_dir().join("stylefusion_cli_pf_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("prompt.txt");
        std::fs::write(&path, "prompt from file").unwrap();

        let cli = Cli::parse_from(["stylefusion", "-p", path.to_str().unwrap()]);
        assert!(cli.prompt.is_none());
        assert_eq!(cli.resolve_prompt().unwrap(), "prompt from file");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_prompt_is_empty() {
        let cli = Cli::parse_from(["stylefusion", "-i", "me.jpg"]);
        assert_eq!(cli.resolve_prompt().unwrap(), "");
    }

    #[test]
    fn unset_options_stay_unset() {
        let cli = Cli::parse_from(["stylefusion"]);
        assert!(cli.identity.is_none());
        assert!(cli.style.is_none());
        assert!(cli.mode.is_none());
        assert!(cli.model.is_none());
        assert!(cli.analysis_model.is_none());
        assert!(cli.format.is_none());
        assert!(cli.output.is_none());
        assert!(!cli.data_uri);
        assert!(!cli.verbose);
    }

    #[test]
    fn all_options() {
        let cli = Cli::parse_from([
            "stylefusion",
            "-i",
            "me.jpg",
            "-s",
            "ghibli.png",
            "-m",
            "full-style",
            "--model",
            "nano-banana-pro",
            "--analysis-model",
            "pro",
            "-f",
            "webp",
            "-o",
            "out.webp",
            "--data-uri",
            "-v",
            "cel shaded",
        ]);
        assert_eq!(cli.style.as_deref(), Some("ghibli.png"));
        assert_eq!(cli.mode, Some(TransformationMode::FullStyle));
        assert_eq!(cli.model.as_deref(), Some("nano-banana-pro"));
        assert_eq!(cli.analysis_model.as_deref(), Some("pro"));
        assert_eq!(cli.format.as_deref(), Some("webp"));
        assert_eq!(cli.output.as_deref(), Some("out.webp"));
        assert!(cli.data_uri);
        assert!(cli.verbose);
        assert_eq!(cli.prompt.as_deref(), Some("cel shaded"));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["stylefusion", "-m", "cartoon"]).is_err());
    }
}
