use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use log::info;

pub const DEFAULT_OWNER: &str = "Sneha Mandal";

pub const DEFAULT_DESCRIPTION: &str = "I'm Sneha Mandal, a passionate and driven undergraduate student specializing in frontend development. Currently, I'm expanding my expertise into backend technologies and exploring the evolving landscape of Web3. I believe that continuous learning is the key to staying ahead in tech, and I'm committed to honing my skills across the full stack. In parallel with my development journey, I'm delving into the fascinating domain of Quantum Computing\u{2014}a field I believe holds the potential to unlock a new era of computation. To me, it's not just a subject of study, but a gateway to the future, a possible key to what I call the quantum world lock. Outside the realm of technology, I have a deep appreciation for physics, especially astronomy and quantum mechanics, which fuel my curiosity and inspire my thinking. When I'm not coding or reading about the cosmos, you'll find me immersed in books, playing the piano, or expressing creativity through sketching. These pursuits ground me and keep my imagination alive, adding balance to my analytical side.";

pub const DEFAULT_INSTRUCTION: &str = "You are Sneha Mandal's AI Assistant. Your primary goal is to be helpful and engage in natural, human-like conversation. You should answer general questions conversationally. When asked about Sneha Mandal, you should use the following information as your knowledge base. If a question about Sneha cannot be fully answered by this text, you can indicate that your knowledge is based on the provided portfolio, and suggest checking Sneha's full website.";

pub const DEFAULT_MODEL_GREETING: &str =
    "Hello! I'm ready to assist and chat about Sneha Mandal or anything else you'd like to discuss.";

pub const DEFAULT_WIDGET_GREETING: &str =
    "Hi there! I am Sneha Mandal's AI Assistant. How can I help you today?";

pub const DEFAULT_TRIGGER_PHRASES: [&str; 5] = [
    "sneha mandal",
    "who is sneha",
    "about sneha",
    "tell me about sneha",
    "your creator",
];

#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("Failed to read persona file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse persona file '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything the assistant knows about the portfolio owner.
///
/// One value is shared by the proxy (as model context) and by every widget
/// (as the local answer), so the two can never drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub owner: String,
    pub description: String,
    pub instruction: String,
    pub model_greeting: String,
    pub widget_greeting: String,
    trigger_phrases: Vec<String>,
}

/// On-disk shape of a persona override. Absent fields keep the defaults.
#[derive(Deserialize, Debug, Default)]
struct PersonaFile {
    owner: Option<String>,
    description: Option<String>,
    instruction: Option<String>,
    model_greeting: Option<String>,
    widget_greeting: Option<String>,
    trigger_phrases: Option<Vec<String>>,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            instruction: DEFAULT_INSTRUCTION.to_string(),
            model_greeting: DEFAULT_MODEL_GREETING.to_string(),
            widget_greeting: DEFAULT_WIDGET_GREETING.to_string(),
            trigger_phrases: DEFAULT_TRIGGER_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Persona {
    pub fn with_trigger_phrases<I, S>(mut self, phrases: I) -> Self
        where I: IntoIterator<Item = S>, S: AsRef<str>
    {
        self.trigger_phrases = normalize_phrases(phrases);
        self
    }

    pub fn trigger_phrases(&self) -> &[String] {
        &self.trigger_phrases
    }

    /// Case-insensitive substring match against the trigger phrases.
    pub fn is_about_owner(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.trigger_phrases.iter().any(|phrase| lowered.contains(phrase.as_str()))
    }

    /// First turn sent to the model: the instruction followed by the biography.
    pub fn system_context(&self) -> String {
        format!(
            "{}\n\n{}'s Portfolio Information:\n{}",
            self.instruction,
            self.owner,
            self.description
        )
    }

    fn apply(mut self, file: PersonaFile) -> Self {
        if let Some(owner) = file.owner {
            self.owner = owner;
        }
        if let Some(description) = file.description {
            self.description = description;
        }
        if let Some(instruction) = file.instruction {
            self.instruction = instruction;
        }
        if let Some(greeting) = file.model_greeting {
            self.model_greeting = greeting;
        }
        if let Some(greeting) = file.widget_greeting {
            self.widget_greeting = greeting;
        }
        match file.trigger_phrases {
            Some(phrases) => self.with_trigger_phrases(phrases),
            None => self,
        }
    }
}

fn normalize_phrases<I, S>(phrases: I) -> Vec<String>
    where I: IntoIterator<Item = S>, S: AsRef<str>
{
    phrases
        .into_iter()
        .map(|p| p.as_ref().trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

pub fn parse_persona(json: &str) -> Result<Persona, serde_json::Error> {
    let file: PersonaFile = serde_json::from_str(json)?;
    Ok(Persona::default().apply(file))
}

pub fn load_persona<P: AsRef<Path>>(path: P) -> Result<Persona, PersonaError> {
    let display = path.as_ref().display().to_string();
    let content = fs::read_to_string(&path).map_err(|source| PersonaError::Io {
        path: display.clone(),
        source,
    })?;
    parse_persona(&content).map_err(|source| PersonaError::Json { path: display, source })
}

/// Loads the override at `path` if given, otherwise the compiled-in persona.
pub fn resolve_persona(path: Option<&str>) -> Result<Arc<Persona>, PersonaError> {
    match path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => {
            info!("Loading persona from '{}'", path);
            Ok(Arc::new(load_persona(path)?))
        }
        None => {
            info!("Using built-in persona for {}", DEFAULT_OWNER);
            Ok(Arc::new(Persona::default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_trigger_phrases_in_any_case() {
        let persona = Persona::default();
        assert!(persona.is_about_owner("Tell me about Sneha"));
        assert!(persona.is_about_owner("WHO IS SNEHA?"));
        assert!(persona.is_about_owner("Who built you? Is it your Creator?"));
        assert!(persona.is_about_owner("do you know sneha mandal"));
    }

    #[test]
    fn ignores_unrelated_text() {
        let persona = Persona::default();
        assert!(!persona.is_about_owner("What's the weather like?"));
        assert!(!persona.is_about_owner("sneha"));
        assert!(!persona.is_about_owner(""));
    }

    #[test]
    fn classification_is_stable() {
        let persona = Persona::default();
        for text in ["About Sneha please", "hello there", "  your creator  "] {
            assert_eq!(persona.is_about_owner(text), persona.is_about_owner(text));
        }
    }

    #[test]
    fn system_context_embeds_description() {
        let persona = Persona::default();
        let context = persona.system_context();
        assert!(context.starts_with(DEFAULT_INSTRUCTION));
        assert!(context.contains("\n\nSneha Mandal's Portfolio Information:\n"));
        assert!(context.ends_with(DEFAULT_DESCRIPTION));
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let persona = parse_persona(
            r#"{"owner": "Ada", "trigger_phrases": ["  About ADA ", "", "who is ada"]}"#
        ).unwrap();
        assert_eq!(persona.owner, "Ada");
        assert_eq!(persona.description, DEFAULT_DESCRIPTION);
        assert_eq!(persona.trigger_phrases(), ["about ada", "who is ada"]);
        assert!(persona.is_about_owner("Tell me ABOUT Ada"));
        assert!(!persona.is_about_owner("tell me about sneha"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_persona("/nonexistent/persona.json").unwrap_err();
        assert!(matches!(err, PersonaError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/persona.json"));
    }

    #[test]
    fn no_path_resolves_default() {
        let persona = resolve_persona(None).unwrap();
        assert_eq!(*persona, Persona::default());
        let persona = resolve_persona(Some("   ")).unwrap();
        assert_eq!(*persona, Persona::default());
    }
}
