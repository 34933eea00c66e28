//! Fixed texts the bot sends to users.

/// Answer to `/start`.
pub const START_REPLY: &str =
    "¡Hola! Soy tu asistente de información sobre Azure, impulsado por GPT-4o. ¿En qué puedo ayudarte hoy?";

/// Answer to `/help`.
pub const HELP_REPLY: &str = "Puedes preguntarme sobre servicios de Azure, computación en la nube o cualquier tema relacionado. ¡Inténtalo!";

/// The completion API answered without a usable candidate.
pub const NO_ANSWER_REPLY: &str =
    "Lo siento, el modelo de IA no proporcionó una respuesta válida. Inténtalo de nuevo.";

/// The completion API call failed.
pub const SERVICE_UNAVAILABLE_REPLY: &str = "Lo siento, no puedo procesar tu solicitud en este momento debido a un problema con el servicio de IA. Por favor, inténtalo más tarde.";

/// Handling an update failed outside the relay.
pub const UNEXPECTED_ERROR_REPLY: &str =
    "Se ha producido un error inesperado en el bot. Por favor, inténtalo de nuevo más tarde.";
