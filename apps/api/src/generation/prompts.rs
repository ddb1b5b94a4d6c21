// All LLM prompt constants for the Generation module.
// The structured-mode numbers below are restated inside STRUCTURED_SYSTEM;
// keep both in sync (tests check it).

/// Separator the model places between posts in structured mode.
pub const SENTINEL: &str = "|||";

/// Number of posts requested in structured mode.
pub const POST_COUNT: usize = 5;

/// Per-post character ceiling requested in structured mode.
pub const MAX_POST_CHARS: usize = 280;

/// System prompt for structured multi-post mode. Fixes the exact output contract.
pub const STRUCTURED_SYSTEM: &str = "You are a social media expert and ghostwriter \
    specializing in converting blog posts into engaging tweets. \
    Your ONLY task is to take blog posts and convert them into a numbered list of tweets. \
    You must: \
    1. Generate exactly 5 tweets \
    2. Keep each tweet under 280 characters \
    3. Match the original post's style and tone \
    4. Format each tweet on its own line starting with the number and a period \
    5. Separate each tweet with '|||' on its own line \
    6. Do not use hashtags or emojis \
    7. Do not include any other text besides the numbered tweets and separators";

/// Structured-mode user message. Replace `{input_text}` before sending.
pub const STRUCTURED_PROMPT_TEMPLATE: &str = "Convert this blog post into exactly 5 tweets, \
numbered 1-5. ONLY output the numbered tweets, nothing else:

{input_text}";

/// System prompt for free-form remix mode. No structural contract.
pub const REMIX_SYSTEM: &str = "You are a creative writing assistant. \
    Rewrite the text you are given in a fresh, creative and engaging way.";

/// Remix-mode user message. Replace `{input_text}` before sending.
pub const REMIX_PROMPT_TEMPLATE: &str = "Please remix the following text in a creative and \
interesting way. Make it engaging while keeping the core message intact: {input_text}";
