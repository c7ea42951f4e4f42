// Shared prompt fragments. Each service that calls the model keeps its own
// prompts.rs alongside it; only cross-cutting instructions live here.

/// Keeps generated text safe for text-to-speech playback.
pub const VOICE_SAFE_INSTRUCTION: &str = "\
    The questions are going to be read by a voice assistant so do not use \"/\" or \"*\" \
    or any other special characters which might break the voice assistant.";

/// Asks for a bare JSON array of strings and nothing else.
pub const JSON_ARRAY_ONLY_INSTRUCTION: &str = "\
    Please return only the questions, without any additional text. \
    Do NOT use markdown code fences.";
