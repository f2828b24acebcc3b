//! Instruction text for the style analysis and final generation calls.

use serde::{Deserialize, Serialize};

/// Style description used when a style image was given but could not be analysed.
pub const ANALYSIS_FAILED_FALLBACK: &str = "A cinematic high-quality masterpiece.";

/// Style description used when no style image was given.
pub const NO_STYLE_FALLBACK: &str = "A high-quality, professional portrait.";

/// Stand-in for an empty user instruction.
pub const NO_USER_INSTRUCTION: &str = "No additional requests.";

/// How far the subject may be pulled away from photographic realism.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TransformationMode {
    /// Keep human anatomy and realism; apply the style as lighting and grading.
    #[default]
    Realistic,
    /// Re-render the subject entirely in the reference's art style.
    FullStyle,
}

impl TransformationMode {
    /// Closing directive for the style analysis instruction.
    #[must_use]
    pub fn analysis_directive(self) -> &'static str {
        match self {
            Self::Realistic => "Mode: Photorealistic/Cinematic.",
            Self::FullStyle => "Mode: Stylized/Artistic.",
        }
    }

    /// Closing directive for the final generation instruction.
    #[must_use]
    pub fn generation_directive(self) -> &'static str {
        match self {
            Self::Realistic => "Ensure photorealism, natural skin pores, and accurate light bounce.",
            Self::FullStyle => {
                "Ensure full artistic transformation matching the style's unique brushwork or rendering."
            }
        }
    }
}

/// The eight style dimensions the analysis call is asked to cover, with hints.
const STYLE_DIMENSIONS: &[(&str, &str)] = &[
    ("ARTISTIC STYLE", "e.g., Cyberpunk, Oil Painting, 1950s Film Noir, Studio Ghibli Anime, 3D Octane Render"),
    ("LIGHTING", "e.g., Volumetric fog, rim lighting, neon highlights, soft natural sun"),
    ("COLOR PALETTE", "e.g., Duotone teal and orange, monochromatic sepia, vibrant primary colors"),
    ("TEXTURE & MEDIUM", "e.g., Grainy film, canvas texture, smooth vector, hyper-detailed skin"),
    ("OUTFIT & PROPS", "e.g., Techwear, Victorian armor, casual hoodie"),
    ("BACKGROUND & ENVIRONMENT", "e.g., Futuristic Tokyo, overgrown forest, abstract geometric shapes"),
    ("CAMERA ANGLE & MOOD", "e.g., Low angle hero shot, melancholic close-up, high-octane action blur"),
    ("TYPOGRAPHY & OVERLAYS", "if any, describe them"),
];

/// Instruction sent with the style image to obtain a one-paragraph style guide.
#[must_use]
pub fn analysis_instruction(mode: TransformationMode) -> String {
    let mut text = String::from(
        "ACT AS A WORLD-CLASS ART DIRECTOR.\n\
         Analyze this reference image and extract the following attributes so they can \
         drive a generative image model:\n",
    );
    for (name, hint) in STYLE_DIMENSIONS {
        text.push_str(&format!("- {name}: ({hint})\n"));
    }
    text.push_str(
        "\nFORMAT: Output ONLY a single, highly-detailed paragraph that summarizes all of \
         these attributes. The paragraph is a style guide for a NEW image, not a caption \
         of this one.\n",
    );
    text.push_str(mode.analysis_directive());
    text
}

/// Instruction sent with the identity image for the final generation call.
#[must_use]
pub fn generation_instruction(
    style_description: &str,
    user_instruction: &str,
    mode: TransformationMode,
) -> String {
    let user_instruction = match user_instruction.trim() {
        "" => NO_USER_INSTRUCTION,
        trimmed => trimmed,
    };

    format!(
        "TASK: FULL LATENT SPACE REGENERATION.\n\
         IDENTITY SOURCE: Provided Image.\n\
         STYLE GUIDE: {style_description}\n\
         USER REQUEST: {user_instruction}\n\
         \n\
         INSTRUCTIONS:\n\
         1. LOCK IDENTITY: Use the provided image ONLY to learn the face, bone structure, and \
         identity of the subject. Ignore its background.\n\
         2. SYNTHESIZE: Generate a COMPLETELY NEW image from scratch.\n\
         3. NO COMPOSITING: Do not overlay, blend, or reuse the original background of the \
         identity image.\n\
         4. APPLY STYLE: The new image must reflect the STYLE GUIDE attributes in every pixel.\n\
         5. QUALITY: Integrate the subject seamlessly into the new environment with matching \
         lighting and texture.\n\
         \n\
         {directive}",
        directive = mode.generation_directive(),
    )
}
