use crate::alphabet::Alphabet;

/// One language taking part in a run. Immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Language {
    pub code: String,
    pub name: String,
    pub speakers: u64,
    pub alphabet: Alphabet,
}

impl Language {
    pub fn new(code: &str, speakers: u64, alphabet: Alphabet) -> Self {
        Self {
            code: code.to_string(),
            name: display_name(code).to_string(),
            speakers,
            alphabet,
        }
    }
}

/// The default language universe: European languages written in latin script
pub const DEFAULT_LANGUAGES: [&str; 41] = [
    "eng", "deu", "swe", "dan", "nor", "nld", "fry", "isl", "fao", "ltz", "pol", "ces", "slk",
    "slv", "fra", "ita", "spa", "por", "cat", "glg", "roh", "cos", "srd", "ron", "hun", "fin",
    "est", "sme", "cym", "gle", "bre", "glv", "tur", "aze", "lit", "lav", "eus", "mlt", "sqi",
    "hsb", "dsb",
];

/// English display name for an ISO 639-3 code
pub fn display_name(code: &str) -> &'static str {
    match code {
        "eng" => "English",
        "deu" => "German",
        "swe" => "Swedish",
        "dan" => "Danish",
        "nor" => "Norwegian",
        "nld" => "Dutch",
        "fry" => "West Frisian",
        "isl" => "Icelandic",
        "fao" => "Faroese",
        "ltz" => "Luxembourgish",
        "pol" => "Polish",
        "ces" => "Czech",
        "slk" => "Slovak",
        "slv" => "Slovenian",
        "fra" => "French",
        "ita" => "Italian",
        "spa" => "Spanish",
        "por" => "Portuguese",
        "cat" => "Catalan",
        "glg" => "Galician",
        "roh" => "Romansh",
        "cos" => "Corsican",
        "srd" => "Sardinian",
        "ron" => "Romanian",
        "hun" => "Hungarian",
        "fin" => "Finnish",
        "est" => "Estonian",
        "sme" => "Northern Sami",
        "cym" => "Welsh",
        "gle" => "Irish",
        "bre" => "Breton",
        "glv" => "Manx",
        "tur" => "Turkish",
        "aze" => "Azerbaijani",
        "lit" => "Lithuanian",
        "lav" => "Latvian",
        "eus" => "Basque",
        "mlt" => "Maltese",
        "sqi" => "Albanian",
        "hsb" => "Upper Sorbian",
        "dsb" => "Lower Sorbian",
        "wen" => "Sorbian",
        "xal" => "Kalmyk Oirat",
        _ => "[unknown language]",
    }
}
