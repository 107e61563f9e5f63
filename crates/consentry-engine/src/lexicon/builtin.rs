//! Built-in keyword tables.

use super::{LanguageTable, Lexicon};
use std::collections::BTreeMap;

const DIALOG_IDS: &[&str] = &[
    "onetrust-banner-sdk",
    "onetrust-consent-sdk",
    "CybotCookiebotDialog",
    "cookie-banner",
    "cookiebanner",
    "cookie-notice",
    "cookie-consent",
    "cookieConsent",
    "cookie_notice",
    "cookie-law-info-bar",
    "gdpr-cookie-notice",
    "cookie-bar",
    "cookiebar",
    "cookies-banner",
    "consent-banner",
    "gdpr-banner",
    "privacy-banner",
    "usercentrics-root",
    "didomi-host",
    "didomi-notice",
    "qc-cmp2-container",
    "truste-consent-track",
    "cookiescript_injected",
    "iubenda-cs-banner",
    "moove_gdpr_cookie_info_bar",
    "BorlabsCookieBox",
    "axeptio_overlay",
    "tarteaucitronRoot",
    "cmplz-cookiebanner-container",
    "termly-code-snippet-support",
    "klaro",
    "CookieConsent",
];

const DIALOG_CLASSES: &[&str] = &[
    "cc-window",
    "cc-banner",
    "cookie-banner",
    "cookie-notice",
    "cookie-consent",
    "cookie-bar",
    "cookiebar",
    "cookie-popup",
    "cookie-modal",
    "cookie-alert",
    "cookienotice",
    "consent-banner",
    "consent-modal",
    "gdpr-banner",
    "gdpr-consent",
    "cmp-banner",
    "cmplz-cookiebanner",
    "cky-consent-container",
    "fc-consent-root",
    "evidon-banner",
    "osano-cm-window",
    "js-cookie-consent",
    "cookies-eu-banner",
    "eupopup",
];

const CONTAINER_TAGS: &[&str] = &["div", "section", "aside", "footer", "header", "dialog", "form"];

const DIALOG_KEYWORDS: &[&str] = &[
    "cookie",
    "cookies",
    "consent",
    "gdpr",
    "ccpa",
    "do not sell",
    "privacy settings",
    "datenschutz",
    "einwilligung",
    "consentement",
    "témoins",
    "consentimiento",
    "consenso",
    "toestemming",
    "consentimento",
    "ciasteczka",
    "zgoda",
    "kakor",
    "samtycke",
    "samtykke",
    "informasjonskapsler",
    "evästeet",
    "suostumus",
];

const ACCEPT_IDENTIFIERS: &[&str] = &[
    "accept",
    "allow",
    "agree",
    "acknowledge",
    "approve",
    "gotit",
    "got-it",
];

const REJECT_IDENTIFIERS: &[&str] = &[
    "reject",
    "decline",
    "deny",
    "refuse",
    "disallow",
    "disagree",
    "necessary",
    "essential",
    "optout",
    "opt-out",
];

const SETTINGS_IDENTIFIERS: &[&str] = &[
    "settings",
    "setting",
    "preferences",
    "preference",
    "customize",
    "customise",
    "manage",
    "options",
    "configure",
    "config",
    "pc-btn",
];

const COOKIE_TERMS: &[&str] = &[
    "cookie",
    "cookies",
    "tracking",
    "trackers",
    "galletas",
    "témoins",
    "ciasteczka",
    "kakor",
    "evästeet",
];

const INFORMATIONAL_PHRASES: &[&str] = &[
    "learn more",
    "read more",
    "more information",
    "more info",
    "privacy policy",
    "cookie policy",
    "privacy notice",
    "privacy statement",
    "cookie notice",
    "impressum",
    "imprint",
    "datenschutzerklärung",
    "mehr erfahren",
    "en savoir plus",
    "politique de confidentialité",
    "más información",
    "política de privacidad",
    "política de cookies",
    "maggiori informazioni",
    "informativa",
    "meer informatie",
    "privacybeleid",
    "saiba mais",
    "więcej informacji",
    "polityka prywatności",
    "läs mer",
    "læs mere",
    "les mer",
    "lue lisää",
];

const PRIMARY_CLASS_HINTS: &[&str] = &["primary", "main", "cta", "btn-primary"];

const SECONDARY_CLASS_HINTS: &[&str] = &["secondary", "alt"];

const GDPR_TERMS: &[&str] = &[
    "gdpr",
    "dsgvo",
    "rgpd",
    "avg",
    "general data protection regulation",
    "datenschutz-grundverordnung",
    "règlement général sur la protection des données",
    "reglamento general de protección de datos",
    "regolamento generale sulla protezione dei dati",
    "2016/679",
    "legitimate interest",
    "berechtigtes interesse",
    "intérêt légitime",
    "interés legítimo",
    "tcf",
    "iab europe",
    "european economic area",
];

const CCPA_TERMS: &[&str] = &[
    "ccpa",
    "cpra",
    "california",
    "do not sell",
    "do not sell or share",
    "do not sell my personal information",
    "opt out of sale",
    "opt-out of sale",
    "opt out of the sale",
    "shine the light",
];

const GDPR_MARKERS: &[&str] = &["gdpr", "tcf", "dsgvo", "rgpd"];

struct Table {
    code: &'static str,
    accept: &'static [&'static str],
    reject: &'static [&'static str],
    settings: &'static [&'static str],
}

const LANGUAGES: &[Table] = &[
    Table {
        code: "en",
        accept: &[
            "accept all cookies",
            "accept all",
            "accept cookies",
            "accept",
            "i accept",
            "allow all",
            "allow cookies",
            "allow",
            "agree",
            "i agree",
            "agree and close",
            "ok",
            "okay",
            "got it",
            "i understand",
            "understood",
            "continue",
            "yes",
        ],
        reject: &[
            "reject all",
            "reject",
            "decline",
            "decline all",
            "deny",
            "refuse",
            "disagree",
            "necessary only",
            "only necessary",
            "necessary cookies only",
            "use necessary cookies only",
            "essential only",
            "only essential",
            "essential cookies only",
            "strictly necessary",
            "continue without accepting",
            "no thanks",
            "no, thanks",
            "do not accept",
            "don't accept",
            "opt out",
            "opt-out",
            "do not sell",
        ],
        settings: &[
            "settings",
            "cookie settings",
            "preferences",
            "manage",
            "manage preferences",
            "manage cookies",
            "customize",
            "customise",
            "options",
            "more options",
            "configure",
            "set preferences",
            "show purposes",
        ],
    },
    Table {
        code: "de",
        accept: &[
            "alle akzeptieren",
            "alle cookies akzeptieren",
            "akzeptieren",
            "zustimmen",
            "allen zustimmen",
            "ich stimme zu",
            "einverstanden",
            "annehmen",
            "alle annehmen",
            "erlauben",
            "alle erlauben",
            "verstanden",
        ],
        reject: &[
            "alle ablehnen",
            "ablehnen",
            "nur notwendige",
            "nur notwendige cookies",
            "nur erforderliche",
            "nur essenzielle",
            "verweigern",
            "nicht zustimmen",
        ],
        settings: &[
            "einstellungen",
            "cookie-einstellungen",
            "individuelle einstellungen",
            "anpassen",
            "verwalten",
            "mehr optionen",
            "präferenzen",
        ],
    },
    Table {
        code: "fr",
        accept: &[
            "tout accepter",
            "accepter tout",
            "accepter",
            "j'accepte",
            "accepter et fermer",
            "autoriser",
            "tout autoriser",
            "d'accord",
            "j'ai compris",
        ],
        reject: &[
            "tout refuser",
            "refuser tout",
            "refuser",
            "je refuse",
            "rejeter",
            "continuer sans accepter",
            "uniquement les nécessaires",
        ],
        settings: &[
            "paramètres",
            "paramétrer",
            "personnaliser",
            "gérer",
            "gérer mes choix",
            "préférences",
        ],
    },
    Table {
        code: "es",
        accept: &[
            "aceptar todo",
            "aceptar todas",
            "aceptar",
            "acepto",
            "permitir todas",
            "permitir",
            "de acuerdo",
            "entendido",
        ],
        reject: &[
            "rechazar todo",
            "rechazar todas",
            "rechazar",
            "denegar",
            "solo necesarias",
            "solo las necesarias",
        ],
        settings: &[
            "configuración",
            "configurar",
            "ajustes",
            "personalizar",
            "gestionar",
            "preferencias",
        ],
    },
    Table {
        code: "it",
        accept: &[
            "accetta tutto",
            "accetta tutti",
            "accetta",
            "accetto",
            "consenti",
            "acconsento",
        ],
        reject: &[
            "rifiuta tutto",
            "rifiuta tutti",
            "rifiuta",
            "nega",
            "solo necessari",
            "continua senza accettare",
        ],
        settings: &["impostazioni", "personalizza", "gestisci", "preferenze", "opzioni"],
    },
    Table {
        code: "nl",
        accept: &[
            "alles accepteren",
            "accepteren",
            "accepteer",
            "akkoord",
            "ik ga akkoord",
            "alles toestaan",
            "toestaan",
        ],
        reject: &[
            "alles weigeren",
            "weigeren",
            "afwijzen",
            "alleen noodzakelijke",
            "niet akkoord",
        ],
        settings: &["instellingen", "aanpassen", "beheren", "voorkeuren"],
    },
    Table {
        code: "pt",
        accept: &["aceitar todos", "aceitar", "aceito", "concordo", "permitir todos"],
        reject: &["rejeitar todos", "rejeitar", "recusar", "apenas necessários"],
        settings: &[
            "configurações",
            "definições",
            "personalizar",
            "gerir",
            "gerenciar",
            "preferências",
        ],
    },
    Table {
        code: "pl",
        accept: &[
            "zaakceptuj wszystkie",
            "zaakceptuj",
            "akceptuję",
            "akceptuj",
            "zgadzam się",
            "przejdź do serwisu",
        ],
        reject: &["odrzuć wszystkie", "odrzuć", "odmawiam", "tylko niezbędne"],
        settings: &["ustawienia", "dostosuj", "zarządzaj", "preferencje"],
    },
    Table {
        code: "sv",
        accept: &[
            "acceptera alla",
            "acceptera",
            "godkänn alla",
            "godkänn",
            "jag godkänner",
            "tillåt alla",
            "tillåt",
        ],
        reject: &["avvisa alla", "avvisa", "neka", "endast nödvändiga"],
        settings: &["inställningar", "anpassa", "hantera"],
    },
    Table {
        code: "da",
        accept: &[
            "accepter alle",
            "accepter",
            "jeg accepterer",
            "tillad alle",
            "tillad",
            "godkend",
        ],
        reject: &["afvis alle", "afvis", "kun nødvendige"],
        settings: &["indstillinger", "tilpas"],
    },
    Table {
        code: "no",
        accept: &["godta alle", "godta", "aksepter", "tillat alle", "jeg forstår"],
        reject: &["avslå", "avvis", "bare nødvendige"],
        settings: &["innstillinger", "tilpass"],
    },
    Table {
        code: "fi",
        accept: &["hyväksy kaikki", "hyväksy", "salli kaikki"],
        reject: &["hylkää kaikki", "hylkää", "vain välttämättömät"],
        settings: &["asetukset", "muokkaa"],
    },
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(super) fn builtin() -> Lexicon {
    let checkbox_types: BTreeMap<String, Vec<String>> = [
        ("necessary", &["necessary", "essential", "required", "strictly"][..]),
        (
            "analytics",
            &["analytics", "statistics", "statistik", "performance", "measurement"][..],
        ),
        ("marketing", &["marketing", "advertising", "targeting", "ads"][..]),
        (
            "functional",
            &["functional", "preferences", "personalization", "personalisation"][..],
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), owned(v)))
    .collect();

    Lexicon {
        dialog_ids: owned(DIALOG_IDS),
        dialog_classes: owned(DIALOG_CLASSES),
        container_tags: owned(CONTAINER_TAGS),
        dialog_keywords: owned(DIALOG_KEYWORDS),
        accept_identifiers: owned(ACCEPT_IDENTIFIERS),
        reject_identifiers: owned(REJECT_IDENTIFIERS),
        settings_identifiers: owned(SETTINGS_IDENTIFIERS),
        languages: LANGUAGES
            .iter()
            .map(|t| LanguageTable {
                code: t.code.to_string(),
                accept: owned(t.accept),
                reject: owned(t.reject),
                settings: owned(t.settings),
            })
            .collect(),
        cookie_terms: owned(COOKIE_TERMS),
        informational_phrases: owned(INFORMATIONAL_PHRASES),
        primary_class_hints: owned(PRIMARY_CLASS_HINTS),
        secondary_class_hints: owned(SECONDARY_CLASS_HINTS),
        gdpr_terms: owned(GDPR_TERMS),
        ccpa_terms: owned(CCPA_TERMS),
        gdpr_markers: owned(GDPR_MARKERS),
        checkbox_types,
    }
}
