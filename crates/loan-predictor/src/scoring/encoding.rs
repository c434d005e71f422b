use tracing::warn;

/// Code returned for labels outside a field's fitted vocabulary.
pub const FALLBACK_CODE: u8 = 0;

/// Categorical inputs with a closed vocabulary baked into the artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoricalField {
    Gender,
    Education,
    HomeOwnership,
    LoanIntent,
    PriorDefaults,
}

impl CategoricalField {
    pub const fn name(self) -> &'static str {
        match self {
            CategoricalField::Gender => "gender",
            CategoricalField::Education => "education",
            CategoricalField::HomeOwnership => "home_ownership",
            CategoricalField::LoanIntent => "loan_intent",
            CategoricalField::PriorDefaults => "prior_defaults",
        }
    }

    const fn table(self) -> &'static [(&'static str, u8)] {
        match self {
            CategoricalField::Gender => GENDER_CODES,
            CategoricalField::Education => EDUCATION_CODES,
            CategoricalField::HomeOwnership => HOME_OWNERSHIP_CODES,
            CategoricalField::LoanIntent => LOAN_INTENT_CODES,
            CategoricalField::PriorDefaults => PRIOR_DEFAULT_CODES,
        }
    }
}

const GENDER_CODES: &[(&str, u8)] = &[("male", 0), ("female", 1)];

const EDUCATION_CODES: &[(&str, u8)] = &[
    ("High School", 0),
    ("Bachelor", 1),
    ("Master", 2),
    ("Doctor", 3),
];

const HOME_OWNERSHIP_CODES: &[(&str, u8)] = &[("RENT", 0), ("OWN", 1), ("MORTGAGE", 2)];

const LOAN_INTENT_CODES: &[(&str, u8)] = &[
    ("PERSONAL", 0),
    ("EDUCATION", 1),
    ("MEDICAL", 2),
    ("VENTURE", 3),
    ("HOME", 4),
];

const PRIOR_DEFAULT_CODES: &[(&str, u8)] = &[("NO", 0), ("YES", 1)];

/// Total mapping from a raw label to its fitted integer code.
///
/// Gender labels were fitted lowercase, so that field folds case before the
/// lookup; every other vocabulary is matched exactly. Labels outside the
/// vocabulary resolve to [`FALLBACK_CODE`] rather than failing, which keeps
/// the endpoint available but silently feeds the model a default column, so
/// each fallback is logged.
pub fn encode(field: CategoricalField, raw: &str) -> u8 {
    let code = match field {
        CategoricalField::Gender => lookup(field.table(), &raw.to_lowercase()),
        _ => lookup(field.table(), raw),
    };

    match code {
        Some(code) => code,
        None => {
            warn!(
                field = field.name(),
                value = raw,
                "unrecognized category label, encoding as fallback code 0"
            );
            FALLBACK_CODE
        }
    }
}

fn lookup(table: &[(&str, u8)], value: &str) -> Option<u8> {
    table
        .iter()
        .find(|(label, _)| *label == value)
        .map(|(_, code)| *code)
}
