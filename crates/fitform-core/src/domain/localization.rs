//! Message translation.
//!
//! Validators and the backend speak English; the app speaks Spanish. The
//! table maps every known message to its Spanish text. Unknown messages pass
//! through unchanged, and a missing message becomes the generic prompt.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::domain::constraints::Constraints;
use crate::domain::error::DomainError;
use crate::domain::validation::messages;

pub const GENERIC_ES: &str = "Revisa el formulario e inténtalo de nuevo.";
pub const GENERIC_EN: &str = "Check the form and try again.";

/// Backend `detail` strings the client knows about.
pub mod server {
    pub const EMAIL_TAKEN: &str = "Email already registered";
    pub const BAD_CREDENTIALS: &str = "Incorrect email or password";
    pub const NOT_AUTHENTICATED: &str = "Not authenticated";
    pub const INVALID_TOKEN: &str = "Could not validate credentials";
    pub const USER_NOT_FOUND: &str = "User not found";
    pub const FOOD_INVALID_DOMAIN: &str = "invalid_domain";
    pub const FOOD_INSUFFICIENT_DATA: &str = "insufficient_data";
    pub const FOOD_PARSER_FAILED: &str = "invalid_parser_response";
}

/// Client-side messages raised outside the validators.
pub mod client {
    pub const LOGIN_REQUIRED: &str = "You must be logged in";
    pub const SUBMISSION_IN_PROGRESS: &str = "A submission is already in progress";
    pub const BACKEND_UNREACHABLE: &str = "Could not reach the server";
    pub const MEAL_TEXT_TOO_SHORT: &str = "Describe the meal in at least 3 characters";
    pub const MEAL_TEXT_TOO_LONG: &str = "Meal description cannot exceed 3000 characters";
    pub const SKINFOLD_TEXT_EMPTY: &str = "Write the skinfold readings to parse";
    pub const NO_CHANGES: &str = "Nothing to update";
    pub const SIGNED_IN: &str = "Signed in";
    pub const SIGNED_UP: &str = "Account created, you can sign in now";
    pub const PROFILE_SAVED: &str = "Profile updated";
    pub const SKINFOLDS_SAVED: &str = "Skinfold measurement saved";
    pub const MEAL_SAVED: &str = "Meal logged";
}

static SPANISH: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let c = Constraints::STANDARD;
    let mut table: HashMap<String, &'static str> = HashMap::new();
    let mut add = |en: String, es: &'static str| {
        table.insert(en, es);
    };

    add(messages::EMAIL_REQUIRED.into(), "El email es obligatorio");
    add(
        messages::email_too_long(&c),
        "El email no puede superar los 254 caracteres",
    );
    add(messages::EMAIL_INVALID.into(), "Formato de email inválido");
    add(messages::PASSWORD_REQUIRED.into(), "La contraseña es obligatoria");
    add(
        messages::password_too_short(&c),
        "La contraseña debe tener al menos 8 caracteres",
    );
    add(
        messages::password_too_long(&c),
        "La contraseña no puede superar los 72 bytes",
    );
    add(messages::name_required("First name"), "El nombre es obligatorio");
    add(messages::name_required("Last name"), "El apellido es obligatorio");
    add(
        messages::name_too_long("First name", &c),
        "El nombre no puede superar los 100 caracteres",
    );
    add(
        messages::name_too_long("Last name", &c),
        "El apellido no puede superar los 100 caracteres",
    );
    add(messages::AGE_NOT_A_NUMBER.into(), "La edad debe ser un número");
    add(messages::AGE_NOT_WHOLE.into(), "La edad debe ser un número entero");
    add(messages::age_range(&c), "La edad debe estar entre 1 y 120 años");
    add(messages::WEIGHT_NOT_A_NUMBER.into(), "El peso debe ser un número");
    add(messages::weight_range(&c), "El peso debe estar entre 20 y 300 kg");
    add(messages::HEIGHT_NOT_A_NUMBER.into(), "La altura debe ser un número");
    add(messages::height_range(&c), "La altura debe estar entre 100 y 250 cm");
    add(
        messages::ACTIVITY_NOT_A_NUMBER.into(),
        "El nivel de actividad debe ser un número",
    );
    add(
        messages::activity_invalid(),
        "El nivel de actividad debe ser 1.20, 1.35, 1.50, 1.65 o 1.80",
    );
    add(messages::GENDER_REQUIRED.into(), "El sexo es obligatorio");
    add(messages::GENDER_INVALID.into(), "El sexo debe ser masculino o femenino");
    add(messages::OBJECTIVE_REQUIRED.into(), "El objetivo es obligatorio");
    add(messages::objective_invalid(), "Objetivo no válido");
    add(
        messages::AGGRESSIVENESS_NOT_A_NUMBER.into(),
        "El nivel de agresividad debe ser un número",
    );
    add(
        messages::AGGRESSIVENESS_INVALID.into(),
        "El nivel de agresividad debe ser 1, 2 o 3",
    );

    add(server::EMAIL_TAKEN.into(), "Este email ya está registrado");
    add(server::BAD_CREDENTIALS.into(), "Email o contraseña incorrectos");
    add(
        server::NOT_AUTHENTICATED.into(),
        "Tu sesión ha expirado. Inicia sesión de nuevo.",
    );
    add(
        server::INVALID_TOKEN.into(),
        "Tu sesión ha expirado. Inicia sesión de nuevo.",
    );
    add(server::USER_NOT_FOUND.into(), "Usuario no encontrado");
    add(
        server::FOOD_INVALID_DOMAIN.into(),
        "El texto no describe una comida",
    );
    add(
        server::FOOD_INSUFFICIENT_DATA.into(),
        "Faltan datos: indica el alimento y la cantidad",
    );
    add(
        server::FOOD_PARSER_FAILED.into(),
        "No se pudo interpretar la comida, inténtalo de nuevo",
    );

    add(client::LOGIN_REQUIRED.into(), "Debes iniciar sesión");
    add(
        client::SUBMISSION_IN_PROGRESS.into(),
        "Ya hay un envío en curso, espera a que termine",
    );
    add(
        client::BACKEND_UNREACHABLE.into(),
        "No se pudo conectar con el servidor",
    );
    add(
        client::MEAL_TEXT_TOO_SHORT.into(),
        "Describe la comida con al menos 3 caracteres",
    );
    add(
        client::MEAL_TEXT_TOO_LONG.into(),
        "La descripción no puede superar los 3000 caracteres",
    );
    add(
        client::SKINFOLD_TEXT_EMPTY.into(),
        "Escribe las mediciones de pliegues a interpretar",
    );
    add(client::NO_CHANGES.into(), "No hay cambios que guardar");
    add(client::SIGNED_IN.into(), "Sesión iniciada");
    add(
        client::SIGNED_UP.into(),
        "Cuenta creada, ya puedes iniciar sesión",
    );
    add(client::PROFILE_SAVED.into(), "Perfil actualizado");
    add(client::SKINFOLDS_SAVED.into(), "Medición de pliegues guardada");
    add(client::MEAL_SAVED.into(), "Comida registrada");

    table
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" | "es-es" | "spanish" => Ok(Self::Es),
            "en" | "en-us" | "english" => Ok(Self::En),
            other => Err(DomainError::UnknownValue {
                field: "locale",
                value: other.to_string(),
            }),
        }
    }
}

/// Translates English messages into the configured locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Localizer {
    locale: Locale,
}

impl Localizer {
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub const fn spanish() -> Self {
        Self::new(Locale::Es)
    }

    pub const fn english() -> Self {
        Self::new(Locale::En)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Known messages are translated; anything else comes back as is.
    pub fn translate<'a>(&self, message: &'a str) -> Cow<'a, str> {
        match self.locale {
            Locale::En => Cow::Borrowed(message),
            Locale::Es => SPANISH
                .get(message.trim())
                .map(|es| Cow::Borrowed(*es))
                .unwrap_or(Cow::Borrowed(message)),
        }
    }

    pub fn is_known(&self, message: &str) -> bool {
        SPANISH.contains_key(message.trim())
    }

    pub fn generic(&self) -> &'static str {
        match self.locale {
            Locale::Es => GENERIC_ES,
            Locale::En => GENERIC_EN,
        }
    }

    /// Translated message, or the generic prompt when there is none.
    pub fn message_or_generic(&self, message: Option<&str>) -> String {
        match message.map(str::trim).filter(|m| !m.is_empty()) {
            Some(m) => self.translate(m).into_owned(),
            None => self.generic().to_string(),
        }
    }
}
