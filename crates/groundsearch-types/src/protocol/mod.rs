//! Google Gemini `generateContent` protocol types.

pub mod gemini;
pub mod grounding;

pub use gemini::{
    Candidate, GeminiContent, GeminiPart, GeminiRole, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, PromptFeedback, Tool,
};
pub use grounding::{
    GroundingChunk, GroundingMetadata, GroundingSupport, SearchEntryPoint, TextSegment, WebSource,
};
