//! Locale-to-encoding resolution for escaped byte runs.
//!
//! RTF declares the language of a text run with `\lang` / `\deflang` control
//! words carrying a Windows locale identifier (LCID). The LCID selects the
//! legacy byte-oriented codepage used to decode subsequent `\'XX` escapes.

use encoding_rs::Encoding;

/// Fallback used when no locale has been declared or the LCID is unmapped.
pub(crate) const DEFAULT_ENCODING: &Encoding = encoding_rs::WINDOWS_1252;

/// Resolve the encoding declared by a `lang`/`deflang` token.
///
/// The LCID is the first maximal run of decimal digits found in the token;
/// a token without digits, or with an unmapped LCID, resolves to the
/// windows-1252 default.
pub(crate) fn declared_encoding(token: &str) -> &'static Encoding {
    let Some(lcid) = locale_id(token) else {
        return DEFAULT_ENCODING;
    };
    match lcid_to_encoding(lcid) {
        Some(encoding) => encoding,
        None => {
            log::debug!("no encoding mapped for locale {lcid}, defaulting to windows-1252");
            DEFAULT_ENCODING
        },
    }
}

/// Extract the first run of decimal digits from a locale token.
fn locale_id(token: &str) -> Option<u32> {
    let start = token.find(|c: char| c.is_ascii_digit())?;
    let digits = &token[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Map a Windows locale identifier to an encoding_rs Encoding.
///
/// This covers the locales that select a non-default codepage in RTF text
/// written by legacy project management tools. The match compiles to an
/// efficient jump table; the returned references are static.
pub(crate) fn lcid_to_encoding(lcid: u32) -> Option<&'static Encoding> {
    match lcid {
        1025 => Some(encoding_rs::WINDOWS_1256),  // Arabic (Saudi Arabia)
        1026 => Some(encoding_rs::WINDOWS_1251),  // Bulgarian
        1028 => Some(encoding_rs::BIG5),          // Chinese (Taiwan)
        1029 => Some(encoding_rs::WINDOWS_1250),  // Czech
        1032 => Some(encoding_rs::WINDOWS_1253),  // Greek
        1037 => Some(encoding_rs::WINDOWS_1255),  // Hebrew
        1038 => Some(encoding_rs::WINDOWS_1250),  // Hungarian
        1041 => Some(encoding_rs::SHIFT_JIS),     // Japanese
        1042 => Some(encoding_rs::EUC_KR),        // Korean
        1045 => Some(encoding_rs::WINDOWS_1250),  // Polish
        1048 => Some(encoding_rs::WINDOWS_1250),  // Romanian
        1049 => Some(encoding_rs::WINDOWS_1251),  // Russian
        1050 => Some(encoding_rs::WINDOWS_1250),  // Croatian
        1051 => Some(encoding_rs::WINDOWS_1250),  // Slovak
        1052 => Some(encoding_rs::WINDOWS_1250),  // Albanian
        1054 => Some(encoding_rs::WINDOWS_874),   // Thai
        1055 => Some(encoding_rs::WINDOWS_1254),  // Turkish
        1056 => Some(encoding_rs::WINDOWS_1256),  // Urdu
        1058 => Some(encoding_rs::WINDOWS_1251),  // Ukrainian
        1059 => Some(encoding_rs::WINDOWS_1251),  // Belarusian
        1060 => Some(encoding_rs::WINDOWS_1250),  // Slovenian
        1061 => Some(encoding_rs::WINDOWS_1257),  // Estonian
        1062 => Some(encoding_rs::WINDOWS_1257),  // Latvian
        1063 => Some(encoding_rs::WINDOWS_1257),  // Lithuanian
        1065 => Some(encoding_rs::WINDOWS_1256),  // Farsi
        1066 => Some(encoding_rs::WINDOWS_1258),  // Vietnamese
        1068 => Some(encoding_rs::WINDOWS_1254),  // Azeri (Latin)
        1071 => Some(encoding_rs::WINDOWS_1251),  // FYRO Macedonian
        1087 => Some(encoding_rs::WINDOWS_1251),  // Kazakh
        1088 => Some(encoding_rs::WINDOWS_1251),  // Kyrgyz (Cyrillic)
        1091 => Some(encoding_rs::WINDOWS_1254),  // Uzbek (Latin)
        1092 => Some(encoding_rs::WINDOWS_1251),  // Tatar
        1104 => Some(encoding_rs::WINDOWS_1251),  // Mongolian (Cyrillic)
        2049 => Some(encoding_rs::WINDOWS_1256),  // Arabic (Iraq)
        2052 => Some(encoding_rs::GBK),           // Chinese (PRC)
        2074 => Some(encoding_rs::WINDOWS_1250),  // Serbian (Latin)
        2092 => Some(encoding_rs::WINDOWS_1251),  // Azeri (Cyrillic)
        2115 => Some(encoding_rs::WINDOWS_1251),  // Uzbek (Cyrillic)
        3073 => Some(encoding_rs::WINDOWS_1256),  // Arabic (Egypt)
        3076 => Some(encoding_rs::BIG5),          // Chinese (Hong Kong S.A.R.)
        3098 => Some(encoding_rs::WINDOWS_1251),  // Serbian (Cyrillic)
        4097 => Some(encoding_rs::WINDOWS_1256),  // Arabic (Libya)
        4100 => Some(encoding_rs::GBK),           // Chinese (Singapore)
        5121 => Some(encoding_rs::WINDOWS_1256),  // Arabic (Algeria)
        5124 => Some(encoding_rs::BIG5),          // Chinese (Macau S.A.R.)
        6145 => Some(encoding_rs::WINDOWS_1256),  // Arabic (Morocco)
        7169 => Some(encoding_rs::WINDOWS_1256),  // Arabic (Tunisia)
        8193 => Some(encoding_rs::WINDOWS_1256),  // Arabic (Oman)
        9217 => Some(encoding_rs::WINDOWS_1256),  // Arabic (Yemen)
        10241 => Some(encoding_rs::WINDOWS_1256), // Arabic (Syria)
        11265 => Some(encoding_rs::WINDOWS_1256), // Arabic (Jordan)
        12289 => Some(encoding_rs::WINDOWS_1256), // Arabic (Lebanon)
        13313 => Some(encoding_rs::WINDOWS_1256), // Arabic (Kuwait)
        14337 => Some(encoding_rs::WINDOWS_1256), // Arabic (U.A.E.)
        15361 => Some(encoding_rs::WINDOWS_1256), // Arabic (Bahrain)
        16385 => Some(encoding_rs::WINDOWS_1256), // Arabic (Qatar)
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_locales() {
        assert_eq!(lcid_to_encoding(1041), Some(encoding_rs::SHIFT_JIS));
        assert_eq!(lcid_to_encoding(2052), Some(encoding_rs::GBK));
        assert_eq!(lcid_to_encoding(1049), Some(encoding_rs::WINDOWS_1251));
        assert_eq!(lcid_to_encoding(1036), None); // French uses the default
    }

    #[test]
    fn test_declared_encoding_extracts_digit_run() {
        assert_eq!(declared_encoding("lang1041"), encoding_rs::SHIFT_JIS);
        assert_eq!(declared_encoding("deflang2052"), encoding_rs::GBK);
        // Digits may appear after trailing text from the same token.
        assert_eq!(declared_encoding("langfe1041"), encoding_rs::SHIFT_JIS);
    }

    #[test]
    fn test_declared_encoding_fallback() {
        // Unmapped LCID and digit-less token both fall back to windows-1252.
        assert_eq!(declared_encoding("lang1036"), encoding_rs::WINDOWS_1252);
        assert_eq!(declared_encoding("langnp"), encoding_rs::WINDOWS_1252);
    }
}
