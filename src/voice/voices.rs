//! Prebuilt voice catalog for the Gemini TTS models

/// A prebuilt TTS voice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voice {
    /// Voice identifier sent to the API
    pub name: &'static str,
    /// Short character description for display
    pub description: &'static str,
}

/// Default voice when none is configured
pub const DEFAULT_GEMINI_VOICE: &str = "Zephyr";

/// All prebuilt voices offered by the Gemini TTS models
pub const VOICES: &[Voice] = &[
    Voice { name: "Zephyr", description: "Bright" },
    Voice { name: "Puck", description: "Upbeat" },
    Voice { name: "Charon", description: "Informative" },
    Voice { name: "Kore", description: "Firm" },
    Voice { name: "Fenrir", description: "Excitable" },
    Voice { name: "Leda", description: "Youthful" },
    Voice { name: "Orus", description: "Firm" },
    Voice { name: "Aoede", description: "Breezy" },
    Voice { name: "Callirrhoe", description: "Easy-going" },
    Voice { name: "Autonoe", description: "Bright" },
    Voice { name: "Enceladus", description: "Breathy" },
    Voice { name: "Iapetus", description: "Clear" },
    Voice { name: "Umbriel", description: "Easy-going" },
    Voice { name: "Algieba", description: "Smooth" },
    Voice { name: "Despina", description: "Smooth" },
    Voice { name: "Erinome", description: "Clear" },
    Voice { name: "Algenib", description: "Gravelly" },
    Voice { name: "Rasalgethi", description: "Informative" },
    Voice { name: "Laomedeia", description: "Upbeat" },
    Voice { name: "Achernar", description: "Soft" },
    Voice { name: "Alnilam", description: "Firm" },
    Voice { name: "Schedar", description: "Even" },
    Voice { name: "Gacrux", description: "Mature" },
    Voice { name: "Pulcherrima", description: "Forward" },
    Voice { name: "Achird", description: "Friendly" },
    Voice { name: "Zubenelgenubi", description: "Casual" },
    Voice { name: "Vindemiatrix", description: "Gentle" },
    Voice { name: "Sadachbia", description: "Lively" },
    Voice { name: "Sadaltager", description: "Knowledgeable" },
    Voice { name: "Sulafat", description: "Warm" },
];

/// Look up a voice by name, case-insensitively
#[must_use]
pub fn find_voice(name: &str) -> Option<&'static Voice> {
    VOICES.iter().find(|v| v.name.eq_ignore_ascii_case(name))
}
