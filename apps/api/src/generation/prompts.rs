// All LLM prompt text for the prompt generator.
// The rule defaults are only written to rules.txt on first run; after that the
// file on disk is the source of truth.

/// System message sent with every completion request.
pub const SYSTEM_MESSAGE: &str =
    "You are an AI assistant that generates concise prompts based on given keywords and rules.";

/// Fixed constraint block appended after the rules and keywords.
/// 77 tokens is the prompt budget of the downstream image tooling.
pub const GENERATION_CONSTRAINTS: &str = "\
Generate a concise prompt with good SEO from the input, within 77 tokens.
Avoid photography-related words like realistic, natural lighting, photography, etc.
No quotation marks or dashes, use commas for separation if needed.
Focus on straightforward, richly descriptive titles without vague language or mentioning camera specifics or photography techniques.
Ensure the response is a single line, with no bullet points and no extra line breaks.";

/// Default rules for the parameter-list layout: short microstock titles.
pub const DEFAULT_RULES_MICROSTOCK: &str = "\
Your role is to generate concise names and detailed contexts for microstock images. \
No numbered lists, and each response fits within 77 tokens. \
Each entry is written without quotation marks or dashes, using commas for separation. \
Focus on straightforward, richly descriptive titles without vague language and without \
mentioning camera specifics or photography techniques. \
For example, a suitable response is Watercolor Technique, Abstract vibrant background with \
watercolor blending, Artistic Expression, keeping clarity, relevance and rich descriptiveness \
within the token limit.";

/// Default rules for the aspect-ratio layout: structured scene descriptions.
pub const DEFAULT_RULES_SCENE: &str = r#"Generate detailed, structured scene descriptions ready to copy into an image generator. Cover the subject, posture, foreground (if any), background, composition, tone and atmosphere, and environment. Avoid special symbols. Never mention the word image, describe what is in it instead, like this example: Athletic youth holding yellow basketball. Mint-green sleeveless shirt with black wave pattern. Short dark hair, slight smile. Left arm bent, ball on shoulder. Right arm relaxed. Casual pose. Orange background. Vibrant colors, sporty atmosphere. Studio setting, focus on subject.
If the subject is a person, add the camera angle and shot size too, like medium shot.
Answer without colons, commas are fine.
If the input is short, like a theme or concept, imagine many different scenes from it for wide use. For example
input: lgbtq+ concept
answers:
Medium shot, two individuals walking in a colorful urban setting, one holding a rainbow flag over their shoulder. Casual clothing, vibrant atmosphere, rainbow banners in the background, focus on diversity and inclusivity.
Close-up, two golden rings resting on a smooth rainbow flag fabric. Soft lighting, luxurious feel, symbolizing love and equality, focus on detail and texture.
Group shot, diverse team standing together indoors, smiling confidently. Casual professional attire, warm lighting, shelves in the background, collaborative and empowering atmosphere.
Close-up, colorful sheer rainbow fabric draped on a clean white background. Flowing texture, minimalist composition, vibrant and soft aesthetic.
Keep every answer within the token limit."#;

/// Default contents of params.txt, one selectable suffix per line.
pub const DEFAULT_PARAMS: &[&str] = &["--ar 16:9 --p", "--ar 21:9", "--ar 2:3"];
