//! Log message templates in all supported languages
//!
//! Adding a language means adding a translation for every message: the
//! table is an exhaustive match over `(MessageKey, Language)`, so a
//! partial row cannot compile. The order of `{}` placeholders must be
//! identical across translations because substitution values are supplied
//! positionally.

use crate::domain::Language;

/// Keys for every message the library can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Nag reminder: package released N days ago, check for updates
    CheckForUpdates,
    /// The running interpreter version is explicitly incompatible
    IncompatibleVersion,
    /// The running interpreter is newer than the highest tested version
    UntestedInterpreter,
    /// Informational line naming the package, version, and release date
    VersionInfo,
    /// The running OS is fully supported
    FullOsSupport,
    /// The running OS has only partial support
    PartialOsSupport,
    /// The running OS is explicitly incompatible
    IncompatibleOs,
    /// The running OS is not covered by the support policy
    UnknownOsSupport,
}

/// A function mapping a message key and language to a format template
///
/// The default is [`template`]; embedding packages can inject their own
/// lookup to override or extend the wording.
pub type MessageLookup = fn(MessageKey, Language) -> &'static str;

/// Returns the built-in template for a message in the given language
pub fn template(key: MessageKey, language: Language) -> &'static str {
    match (key, language) {
        (MessageKey::CheckForUpdates, Language::En) => {
            "Your version of {} was released {} days ago. \
             There could be updates and security fixes."
        }
        (MessageKey::CheckForUpdates, Language::De) => {
            "Ihre Version von {} wurde vor {} Tagen veröffentlicht. \
             Updates und Security-Fixes könnten bereit stehen."
        }
        (MessageKey::IncompatibleVersion, Language::En) => {
            "Your version of the interpreter is not compatible with this \
             specific version of {}. Please check if there are any updates \
             that solve this."
        }
        (MessageKey::IncompatibleVersion, Language::De) => {
            "Ihre Version des Interpreters ist nicht kompatibel mit dieser \
             Version von {}. Bitte prüfen Sie, ob ein Update dieses Problem \
             löst."
        }
        (MessageKey::UntestedInterpreter, Language::En) => {
            "Your version of the interpreter is higher than the versions \
             this installation of {} is tested for. Please check for updates."
        }
        (MessageKey::UntestedInterpreter, Language::De) => {
            "Ihre Version des Interpreters ist neuer als alle Versionen, \
             gegen die diese Version von {} getestet wurde. Prüfen Sie, ob \
             es ein Update gibt."
        }
        (MessageKey::VersionInfo, Language::En) => "You are using {} in version {} ({})",
        (MessageKey::VersionInfo, Language::De) => "Sie nutzen {} in Version {} ({})",
        (MessageKey::FullOsSupport, Language::En) => "{} fully supports {}.",
        (MessageKey::FullOsSupport, Language::De) => "{} unterstützt {} vollständig.",
        (MessageKey::PartialOsSupport, Language::En) => "{} has only partial support for {}.",
        (MessageKey::PartialOsSupport, Language::De) => {
            "{} unterstützt {} nur eingeschränkt."
        }
        (MessageKey::IncompatibleOs, Language::En) => "{} is incompatible with {}.",
        (MessageKey::IncompatibleOs, Language::De) => "{} ist mit {} nicht kompatibel.",
        (MessageKey::UnknownOsSupport, Language::En) => {
            "The support of {} for {} is unknown."
        }
        (MessageKey::UnknownOsSupport, Language::De) => {
            "Die Unterstützung von {} für {} ist unbekannt."
        }
    }
}

/// Substitutes `args` into the positional `{}` placeholders of `template`
///
/// Surplus placeholders are left in place; surplus arguments are ignored.
pub fn render(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();

    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}
