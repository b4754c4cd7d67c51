//! crates/scriptgo_core/src/prompts.rs
//!
//! Prompt assembly for the content generators. The persona, structure, and
//! framework tables live here as constants; assembly stitches them together
//! around one `GenerationConfig`. Assembly is pure and deterministic so the
//! same configuration always yields the same prompt.

use crate::domain::{GenerationConfig, Platform, ScriptDuration};
use chrono::{DateTime, Utc};

//=========================================================================================
// Intent Classification
//=========================================================================================

/// The content intent inferred from the topic text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Educational,
    Story,
    Tutorial,
    Opinion,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Educational => "educational",
            Intent::Story => "story",
            Intent::Tutorial => "tutorial",
            Intent::Opinion => "opinion",
        }
    }
}

/// Keyword groups checked in order against the lowercased topic. The first
/// group with a match wins; unmatched topics fall back to educational.
const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (Intent::Tutorial, &["how to", "guide", "steps"]),
    (Intent::Story, &["day in the life", "story", "experience"]),
    (Intent::Opinion, &["opinion", "why i", "thoughts on"]),
];

pub fn classify_intent(topic: &str) -> Intent {
    let topic = topic.to_lowercase();
    for (intent, keywords) in INTENT_KEYWORDS {
        if keywords.iter().any(|keyword| topic.contains(keyword)) {
            return *intent;
        }
    }
    Intent::Educational
}

//=========================================================================================
// Structure, Persona, and Framework Tables
//=========================================================================================

const EDUCATIONAL_STRUCTURE: &str = r#"Role: Mentor / Educator
Structure:
1. Hook: Start with a curious fact or a common misconception.
2. Context: Explain why this piece of knowledge is a game-changer.
3. Main Explanation: 3-5 short, clear paragraphs breaking down the core concepts. No jargon.
4. Analogy/Story: Use a simple comparison to make it click.
5. Takeaway: One powerful sentence for the audience to remember.
6. Closing: Professional but warm sign-off."#;

const STORY_STRUCTURE: &str = r#"Role: Storyteller / Friend
Structure:
1. Hook: Start "in media res" or with a vulnerable moment.
2. Context: Set the scene—where were you when this happened?
3. Narrative: Describe the experience, the struggle, and the epiphany.
4. Lesson: What did this experience teach you?
5. Practical Takeaway: How can the audience apply this lesson?
6. Closing: A thought-provoking friendly closing."#;

const TUTORIAL_STRUCTURE: &str = r#"Role: Expert Guide
Structure:
1. Hook: Focus on the specific problem being solved.
2. Why it matters: The cost of not knowing this.
3. Steps: Clear, simple, and logical progression. Use human language for transitions.
4. Pro Tip: A "secret" nugget to add extra value.
5. Result: Describe what success looks like.
6. Closing: Encouraging friendly closing line."#;

const OPINION_STRUCTURE: &str = r#"Role: Thought Leader / Peer
Structure:
1. Hook: A strong, possibly contrarian opening statement.
2. Reasoning: Clear, logical support for your stance.
3. Example: A real-world scenario where this opinion holds true.
4. Conclusion: Reiterate the vision or final thought.
5. Takeaway: A call to reflect or a specific challenge.
6. Closing: Friendly, open-ended closing line."#;

fn intent_structure(intent: Intent) -> &'static str {
    match intent {
        Intent::Educational => EDUCATIONAL_STRUCTURE,
        Intent::Story => STORY_STRUCTURE,
        Intent::Tutorial => TUTORIAL_STRUCTURE,
        Intent::Opinion => OPINION_STRUCTURE,
    }
}

const YOUTUBE_PERSONA: &str = r#"Role: Script writer for spoken video content.
Rules:
- Start with a strong, curiosity-driven hook.
- Use a natural, conversational flow as if speaking to a friend.
- NO scene tags, NO host/speaker labels, NO technical formatting (like [Music] or [B-roll]).
- Use transition words that feel human (e.g., "Here's where it gets interesting," "What really surprised me was").
- End with a warm, non-intrusive CTA."#;

const LINKEDIN_PERSONA: &str = r#"Role: Insightful writer for text-based social content.
Rules:
- Start with a compelling text hook that stops the scroll.
- Use short paragraphs and white space for readability.
- Authoritative yet human and accessible tone.
- NO technical jargon or robotic headers.
- Provide 2-3 clear takeaways.
- End with a thought-provoking question or friendly engagement line."#;

fn platform_persona(platform: Platform) -> &'static str {
    match platform {
        Platform::Youtube => YOUTUBE_PERSONA,
        Platform::Linkedin => LINKEDIN_PERSONA,
    }
}

const ENGLISH_PERSONA: &str = r#"You are a native English-speaking creator. Your style is conversational, relaxed, and human.
Use simple words, short sentences, and natural pauses.
Avoid sounding scripted, corporate, or overly polished.
It should feel like someone thinking and speaking naturally.
Minor imperfections in flow are encouraged to sound real."#;

const TAMIL_PERSONA: &str = r#"You are a Tamil YouTube content creator. Write in natural, spoken Tamil (பேசுற மாதிரி).
Avoid formal or literary Tamil (textbook style).
Mix common English words naturally where creators usually do (e.g., reach, growth, content, idea).
Use short sentences, light pauses, and rhetorical questions.
Sound like a creator talking to a camera, not reading an article.
Do NOT sound like translated English."#;

const TELUGU_PERSONA: &str = r#"You are a Telugu content creator. Write in natural, spoken Telugu used by creators.
Avoid bookish or formal (Grandhika/Vyaharika) Telugu.
Mix commonly used English words naturally.
Sound friendly, energetic, and relatable.
Do NOT sound like translated English or formal news reporting."#;

const HINDI_PERSONA: &str = r#"You are a Hindi content creator. Use Hinglish (Hindi mixed with common English) naturally.
Avoid "Shuddh" or overly formal Hindi.
Use a conversational tone similar to popular Indian YouTubers.
Keep it relatable, using "aap" or "tum" based on the platform and tone.
Sound human, with natural transitions and pauses."#;

const SPANISH_PERSONA: &str = r#"You are a Spanish-speaking content creator. Use natural, conversational Spanish.
Avoid overly formal or academic phrasing.
Use regionalisms appropriately if relevant, or keep it neutrally casual (Español Neutro/Coloquial).
Sound like a human speaking to an audience, with varied sentence lengths and a clear personality."#;

const FRENCH_PERSONA: &str = r#"You are a French content creator. Use "Français courant" and conversational idioms.
Avoid "soutenu" or overly formal grammar when a casual tone is requested.
Vary sentence structure to feel like spontaneous speech."#;

fn language_persona(language: &str) -> Option<&'static str> {
    match language {
        "english" => Some(ENGLISH_PERSONA),
        "tamil" => Some(TAMIL_PERSONA),
        "telugu" => Some(TELUGU_PERSONA),
        "hindi" => Some(HINDI_PERSONA),
        "spanish" => Some(SPANISH_PERSONA),
        "french" => Some(FRENCH_PERSONA),
        _ => None,
    }
}

const AIDA_RULES: &str = r#"Use the AIDA (Attention, Interest, Desire, Action) framework naturally to guide the internal structure.
Do NOT label the sections.
Ensure the flow feels continuous and conversational.
The 'Attention' phase should be the spoken hook.
The 'Action' phase should be a warm, human CTA."#;

const PAS_RULES: &str = r#"Use the PAS (Problem, Agitation, Solution) framework naturally to guide the internal structure.
Do NOT explicitly mention "Problem" or "Solution" in the text.
The flow should feel like a human explaining how to solve a real struggle.
Focus on empathy and clarity."#;

fn framework_rules(framework: &str) -> Option<&'static str> {
    match framework {
        "aida" => Some(AIDA_RULES),
        "pas" => Some(PAS_RULES),
        _ => None,
    }
}

//=========================================================================================
// Length Bands
//=========================================================================================

/// The word-count instruction placed in the user prompt for each band.
pub fn length_instruction(duration: ScriptDuration) -> &'static str {
    match duration {
        ScriptDuration::Short => "Aim for 200-300 words. Be punchy and fast-paced.",
        ScriptDuration::Standard => "Aim for 800-1200 words. Be very detailed.",
        ScriptDuration::Long => {
            "Aim for 1200-1500 words. This is a deep-dive video. Provide extensive examples, \
             detailed explanations for every point, and clear 'thinking' segments. DO NOT be concise."
        }
    }
}

//=========================================================================================
// Prompt Assembly
//=========================================================================================

fn normalized_language(language: &str) -> String {
    let language = language.trim().to_lowercase();
    if language.is_empty() {
        "english".to_string()
    } else {
        language
    }
}

/// Builds the system prompt: brand voice, platform persona, structure for the
/// classified intent, then the universal rules and the language directives.
pub fn assemble_system_prompt(config: &GenerationConfig) -> String {
    let language = normalized_language(&config.language);
    let intent = classify_intent(&config.topic);
    let tone = if config.tone.trim().is_empty() {
        "Professional but friendly"
    } else {
        config.tone.trim()
    };
    let audience = config
        .audience
        .as_deref()
        .map(str::trim)
        .filter(|audience| !audience.is_empty())
        .unwrap_or("General");

    let mut prompt = format!(
        r#"You are ScriptGo, a friendly content writer.
Write content that sounds human, warm, and natural.
No scene labels, no technical formatting.
Short paragraphs.
Simple words.
Friendly tone.

PLATFORM CONTEXT:
{persona}

CONTENT STRUCTURE (Intent: {intent}):
{structure}
"#,
        persona = platform_persona(config.platform),
        intent = intent.as_str(),
        structure = intent_structure(intent),
    );

    if let Some(persona) = language_persona(&language) {
        prompt.push_str(&format!("\nLANGUAGE STYLE:\n{}\n", persona));
    }
    if let Some(framework) = config.framework.as_deref() {
        if let Some(rules) = framework_rules(&framework.trim().to_lowercase()) {
            prompt.push_str(&format!("\nFRAMEWORK:\n{}\n", rules));
        }
    }

    prompt.push_str(&format!(
        r#"
TOPIC EXPANSION & THINKING:
Before generating the final content, internally expand the topic:
- Identify the core routine/concept.
- List the tools/mindset involved.
- Pinpoint the value created for the audience.
- Use these expanded points to write the friendly content.

FRIENDLY LANGUAGE FILTER:
Replace robotic AI transitions with human ones:
- Replace "In this video we will explore" with "Here's the interesting part..."
- Replace "Let us dive into" with "What surprised me was..."
- Replace "Firstly/Secondly" with "The cool thing is..." or "Then there's..."

UNIVERSAL BRAIN RULES:
- Write like you're explaining to a friend.
- NO scene tags, NO host labels, NO visuals.
- Use simple human language.
- Be warm, confident, and natural.
- Tone: {tone}.
- Audience: {audience}.
- Language: {language}.

CRITICAL: The user has requested the output in {upper}. You MUST write the ENTIRE response in {upper}. DO NOT use English unless it is {language} script mix (like Hinglish). If you write in English when {language} was requested, it is a failure.

CRITICAL: Return ONLY plain text. DO NOT use JSON, DO NOT use keys/values, DO NOT use structural tags like <script> or {{hook}}.
Just write the content as a friendly human would."#,
        tone = tone,
        audience = audience,
        language = language,
        upper = language.to_uppercase(),
    ));

    prompt
}

/// Builds the user prompt: topic, target length, and the universal section
/// structure the model should follow without labeling.
pub fn assemble_user_prompt(config: &GenerationConfig) -> String {
    format!(
        r#"Topic: {topic}
Target Duration: {duration} ({instruction})

Follow this structure (don't label sections):
1. Hook (Hook the viewer immediately)
2. Context (Why this matters deeply)
3. Main explanation (Multiple in-depth sections. If 'Long', split into 5-7 detailed parts)
4. Extensive examples or human stories
5. Practical, multi-step takeaways
6. Friendly closing line

Write entirely in {language}."#,
        topic = config.topic,
        duration = config.duration,
        instruction = length_instruction(config.duration),
        language = config.language,
    )
}

/// Builds the user prompt for batch planning. The response must be a JSON
/// object so it can be requested in JSON mode and parsed mechanically.
pub fn assemble_batch_user_prompt(
    config: &GenerationConfig,
    days: u32,
    start_date: DateTime<Utc>,
) -> String {
    format!(
        r#"Plan {days} consecutive days of content about "{topic}" for {platform}.

Return a single JSON object with this exact shape:
{{"scripts": [{{"topic": "...", "content": "...", "scheduled_date": "YYYY-MM-DD"}}]}}

Rules:
- Exactly {days} entries, one per day, in order.
- Day 1 is {start}; increment the date by one day for each later entry.
- Label each topic "Day N: ..." with a specific angle on the overall theme.
- Each content is a complete script that follows the system rules.
- Write every content in {language}."#,
        days = days,
        topic = config.topic,
        platform = config.platform,
        start = start_date.format("%Y-%m-%d"),
        language = config.language,
    )
}
